//! A generic A* over any graph given as a successor function. Node bookkeeping lives in an
//! insertion-ordered [IndexMap] so the frontier only has to carry indices.
//!
//! Frontier order: lowest estimated total cost first; among equal estimates the node with the
//! highest cost so far (the deepest one) first; among nodes equal in both, the one pushed first.
//! The last key makes the result fully deterministic for a given successor order.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct FrontierEntry<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialEq> Eq for FrontierEntry<K> {}

impl<K: PartialEq> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: "greater" pops first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Finds a cheapest path from `start` to a node satisfying `success`. Returns the nodes of the
/// path, `start` included, and its total cost, or [None] once the frontier is exhausted.
///
/// `heuristic` must be admissible for the result to be optimal. All state is local to the call.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut sequence = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(FrontierEntry {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        sequence,
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    while let Some(FrontierEntry { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, best))) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            // A node is pushed again whenever a cheaper way to it is found; only the entry
            // carrying the best known cost gets expanded.
            if cost > best {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            sequence += 1;
            to_see.push(FrontierEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                sequence,
                index: n,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small weighted digraph:
    //   0 -1-> 1 -1-> 3
    //   0 -5-> 3
    //   0 -1-> 2 -1-> 3
    fn graph(node: &u32) -> Vec<(u32, u32)> {
        match node {
            0 => vec![(1, 1), (3, 5), (2, 1)],
            1 => vec![(3, 1)],
            2 => vec![(3, 1)],
            _ => vec![],
        }
    }

    #[test]
    fn finds_cheapest_path() {
        let (path, cost) = astar(&0, graph, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(cost, 2);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], 0);
        assert_eq!(path[2], 3);
    }

    #[test]
    fn ties_resolve_to_first_pushed_successor() {
        let (path, _) = astar(&0, graph, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
    }

    #[test]
    fn start_satisfying_success_is_a_single_node_path() {
        let (path, cost) = astar(&3, graph, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![3]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausted_frontier_returns_none() {
        assert!(astar(&1, graph, |_| 0, |n| *n == 0).is_none());
    }

    #[test]
    fn cycles_terminate() {
        let ring = |n: &u32| vec![((n + 1) % 10, 1u32)];
        assert!(astar(&0, ring, |_| 0, |n| *n == 42).is_none());
        let (path, cost) = astar(&0, ring, |_| 0, |n| *n == 7).unwrap();
        assert_eq!(cost, 7);
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn later_cheaper_route_replaces_earlier_parent() {
        // 0 -> 2 directly costs 10, through 1 only 2.
        let edges = |n: &u32| match n {
            0 => vec![(2, 10), (1, 1)],
            1 => vec![(2, 1)],
            _ => vec![],
        };
        let (path, cost) = astar(&0, edges, |_| 0u32, |n| *n == 2).unwrap();
        assert_eq!(cost, 2);
        assert_eq!(path, vec![0, 1, 2]);
    }
}
