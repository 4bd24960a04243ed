use std::collections::HashMap;

use crate::osm::{NodeID, WayID};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeRecord {
    pub id: NodeID,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WayRecord {
    pub id: WayID,
    pub nodes: Vec<NodeID>,
}

/// Every node and way seen so far, looked up by ID. Relations may reference anything earlier in
/// the file, so nothing is ever evicted. Records are never updated or deleted; a second insert
/// for the same ID is ignored, since the input format guarantees IDs are unique.
#[derive(Default)]
pub struct EntityStore {
    nodes: HashMap<NodeID, NodeRecord>,
    ways: HashMap<WayID, WayRecord>,
}

impl EntityStore {
    pub fn new() -> EntityStore {
        EntityStore::default()
    }

    pub fn put_node(&mut self, id: NodeID, lat: f64, lon: f64) {
        self.nodes.entry(id).or_insert(NodeRecord { id, lat, lon });
    }

    pub fn put_way(&mut self, id: WayID, nodes: Vec<NodeID>) {
        self.ways.entry(id).or_insert(WayRecord { id, nodes });
    }

    pub fn get_node(&self, id: NodeID) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    pub fn get_way(&self, id: WayID) -> Option<&WayRecord> {
        self.ways.get(&id)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_ways(&self) -> usize {
        self.ways.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        let mut store = EntityStore::new();
        store.put_node(NodeID(1), 55.75, 37.5);
        store.put_way(WayID(7), vec![NodeID(1), NodeID(2)]);

        assert_eq!(
            store.get_node(NodeID(1)),
            Some(&NodeRecord {
                id: NodeID(1),
                lat: 55.75,
                lon: 37.5
            })
        );
        assert_eq!(store.get_node(NodeID(2)), None);
        assert_eq!(
            store.get_way(WayID(7)).map(|w| w.nodes.clone()),
            Some(vec![NodeID(1), NodeID(2)])
        );
        assert!(store.get_way(WayID(8)).is_none());
        assert_eq!((store.num_nodes(), store.num_ways()), (1, 1));
    }

    #[test]
    fn first_insert_wins() {
        let mut store = EntityStore::new();
        store.put_node(NodeID(1), 1.0, 2.0);
        store.put_node(NodeID(1), 3.0, 4.0);
        assert_eq!(store.get_node(NodeID(1)).map(|n| n.lat), Some(1.0));
    }
}
