//! Stitching way fragments into rings. OSM boundaries are stored as a pile of open polylines in
//! no particular order or orientation; gluing them end-to-end recovers the closed rings.

use std::collections::VecDeque;

use crate::osm::NodeID;

/// A polyline of node IDs. Never empty. Closed when it has more than one node and starts and
/// ends at the same node.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    nodes: VecDeque<NodeID>,
}

/// How a fragment attaches to an existing chain. The existing chain always keeps its orientation
/// and the fragment is flipped if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Join {
    /// existing.back == fragment.front, so existing then fragment
    After,
    /// existing.back == fragment.back, so existing then the reversed fragment
    AfterReversed,
    /// existing.front == fragment.back, so fragment then existing
    Before,
    /// existing.front == fragment.front, so the reversed fragment then existing
    BeforeReversed,
}

impl Chain {
    pub fn new(nodes: Vec<NodeID>) -> Option<Chain> {
        if nodes.is_empty() {
            return None;
        }
        Some(Chain {
            nodes: nodes.into(),
        })
    }

    pub fn front(&self) -> NodeID {
        self.nodes[0]
    }

    pub fn back(&self) -> NodeID {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.front() == self.back()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.nodes.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NodeID> {
        self.nodes.iter().copied().collect()
    }

    // When several joins are possible (a fragment touching both ends of the existing chain, or a
    // chain that loops), the first one listed wins. That's arbitrary, but deterministic.
    fn find_join(&self, existing: &Chain) -> Option<Join> {
        let (nf, nl) = (self.front(), self.back());
        let (cf, cl) = (existing.front(), existing.back());
        if cl == nf {
            Some(Join::After)
        } else if cl == nl {
            Some(Join::AfterReversed)
        } else if cf == nl {
            Some(Join::Before)
        } else if cf == nf {
            Some(Join::BeforeReversed)
        } else {
            None
        }
    }

    fn reverse(&mut self) {
        self.nodes.make_contiguous().reverse();
    }

    /// Take over all of the existing chain's nodes. The shared endpoint appears once.
    fn absorb(&mut self, existing: Chain, join: Join) {
        match join {
            Join::After | Join::AfterReversed => {
                if join == Join::AfterReversed {
                    self.reverse();
                }
                self.nodes.pop_front();
                for node in existing.nodes.into_iter().rev() {
                    self.nodes.push_front(node);
                }
            }
            Join::Before | Join::BeforeReversed => {
                if join == Join::BeforeReversed {
                    self.reverse();
                }
                self.nodes.pop_back();
                self.nodes.extend(existing.nodes);
            }
        }
    }
}

/// Holds the chains assembled so far for one region. Merging happens eagerly on every insert, so
/// no two open chains held here ever share an endpoint.
#[derive(Default)]
pub struct ChainMerger {
    chains: Vec<Chain>,
}

impl ChainMerger {
    pub fn new() -> ChainMerger {
        ChainMerger::default()
    }

    /// Add one fragment, gluing it to every existing open chain it touches. An empty fragment is
    /// ignored.
    ///
    /// One pass over the existing chains is enough. Before this insert, no two open chains share
    /// an endpoint, so after the fragment absorbs some chain, its new endpoint can't match any
    /// chain already passed over.
    pub fn insert(&mut self, nodes: Vec<NodeID>) {
        let mut fragment = match Chain::new(nodes) {
            Some(c) => c,
            None => return,
        };

        let mut idx = 0;
        while idx < self.chains.len() && !fragment.is_closed() {
            if self.chains[idx].is_closed() {
                idx += 1;
                continue;
            }
            match fragment.find_join(&self.chains[idx]) {
                Some(join) => {
                    let existing = self.chains.remove(idx);
                    fragment.absorb(existing, join);
                }
                None => {
                    idx += 1;
                }
            }
        }

        self.chains.push(fragment);
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn into_chains(self) -> Vec<Chain> {
        self.chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: i64 = 1;
    const B: i64 = 2;
    const C: i64 = 3;
    const D: i64 = 4;
    const E: i64 = 5;

    fn ids(raw: &[i64]) -> Vec<NodeID> {
        raw.iter().map(|x| NodeID(*x)).collect()
    }

    fn merge(fragments: &[&[i64]]) -> Vec<Vec<NodeID>> {
        let mut merger = ChainMerger::new();
        for f in fragments {
            merger.insert(ids(f));
        }
        merger.chains().iter().map(|c| c.to_vec()).collect()
    }

    #[test]
    fn extends_in_same_direction() {
        assert_eq!(merge(&[&[A, B, C], &[C, D, E]]), vec![ids(&[A, B, C, D, E])]);
    }

    #[test]
    fn flips_reversed_fragments() {
        assert_eq!(merge(&[&[A, B, C], &[E, D, C]]), vec![ids(&[A, B, C, D, E])]);
        assert_eq!(merge(&[&[C, D, E], &[C, B, A]]), vec![ids(&[A, B, C, D, E])]);
        assert_eq!(merge(&[&[C, D, E], &[A, B, C]]), vec![ids(&[A, B, C, D, E])]);
    }

    #[test]
    fn closes_a_ring() {
        let chains = merge(&[&[A, B, C], &[C, D, A]]);
        assert_eq!(chains, vec![ids(&[A, B, C, D, A])]);

        let mut merger = ChainMerger::new();
        merger.insert(ids(&[A, B, C]));
        merger.insert(ids(&[C, D, A]));
        let ring = &merger.chains()[0];
        assert!(ring.is_closed());
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.front(), NodeID(A));
    }

    #[test]
    fn disjoint_fragments_stay_apart() {
        let forwards = merge(&[&[A, B], &[C, D]]);
        let backwards = merge(&[&[C, D], &[A, B]]);
        assert_eq!(forwards.len(), 2);
        assert_eq!(backwards.len(), 2);
        for chain in &forwards {
            assert!(backwards.contains(chain));
        }
    }

    #[test]
    fn one_insert_can_bridge_two_chains() {
        assert_eq!(merge(&[&[A, B], &[C, D], &[B, C]]), vec![ids(&[A, B, C, D])]);
        // The bridge touches both chains from the other side
        assert_eq!(merge(&[&[B, A], &[D, C], &[B, C]]).len(), 1);
        assert_eq!(merge(&[&[B, A], &[D, C], &[B, C]])[0].len(), 4);
    }

    #[test]
    fn no_node_lost_or_duplicated() {
        // Scrambled pieces of the ring 1..=8
        let chains = merge(&[&[3, 4, 5], &[8, 1], &[5, 6], &[1, 2, 3], &[8, 7, 6]]);
        assert_eq!(chains.len(), 1);
        let ring = &chains[0];
        assert_eq!(ring.len(), 9);
        assert_eq!(ring[0], ring[8]);
        let mut interior: Vec<i64> = ring[..8].iter().map(|n| n.0).collect();
        interior.sort();
        assert_eq!(interior, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        for pair in ring.windows(2) {
            let (a, b) = (pair[0].0, pair[1].0);
            assert!((a - b).abs() == 1 || (a - b).abs() == 7, "{} -> {}", a, b);
        }
    }

    #[test]
    fn closed_rings_are_left_alone() {
        let chains = merge(&[&[A, B, C, A], &[A, D, E]]);
        assert_eq!(chains, vec![ids(&[A, B, C, A]), ids(&[A, D, E])]);

        // A closed fragment doesn't absorb anything either
        let chains = merge(&[&[A, D], &[A, B, C, A]]);
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn several_rings_and_leftovers() {
        let chains = merge(&[&[1, 2], &[10, 11], &[2, 3, 1], &[11, 12], &[20, 21]]);
        assert_eq!(chains.len(), 3);
        assert!(chains.iter().any(|c| c == &ids(&[1, 2, 3, 1])));
        assert!(chains.iter().any(|c| c == &ids(&[10, 11, 12])));
        assert!(chains.iter().any(|c| c == &ids(&[20, 21])));
    }

    #[test]
    fn empty_and_single_node_fragments() {
        let mut merger = ChainMerger::new();
        merger.insert(Vec::new());
        assert!(merger.chains().is_empty());

        merger.insert(ids(&[A]));
        assert!(!merger.chains()[0].is_closed());
        merger.insert(ids(&[A, B]));
        assert_eq!(merger.into_chains().len(), 1);
    }

    #[test]
    fn duplicated_way_folds_back_on_itself() {
        assert_eq!(merge(&[&[A, B], &[A, B]]), vec![ids(&[A, B, A])]);
    }
}
