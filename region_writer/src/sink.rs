use anyhow::Result;

use regionutil::Warn;

use crate::diagnostics::{Diagnostic, OrderingViolation};
use crate::osm::{OsmID, RelationID};
use crate::reader::{Entity, Relation};
use crate::region::{qualifying_name, try_build_region, Region};
use crate::store::EntityStore;
use crate::Options;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Absorbing nodes and ways into the store
    ConsumingEntities,
    /// At least one relation has arrived; no more nodes or ways are allowed
    AssemblingRegions,
    /// A node or way arrived too late. Everything from here on is rejected.
    Aborted,
}

/// Consumes the entity stream one record at a time. Nodes and ways go into the store; each
/// qualifying boundary relation is assembled into a region right away, using whatever the store
/// holds at that point.
pub struct RegionSink {
    opts: Options,
    phase: Phase,
    first_relation: Option<RelationID>,
    store: EntityStore,
    regions: Vec<Region>,
    diagnostics: Vec<Diagnostic>,
}

/// Everything a finished stream produced.
pub struct Assembled {
    pub store: EntityStore,
    pub regions: Vec<Region>,
}

impl RegionSink {
    pub fn new(opts: Options) -> RegionSink {
        RegionSink {
            opts,
            phase: Phase::ConsumingEntities,
            first_relation: None,
            store: EntityStore::new(),
            regions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Fails with an `OrderingViolation` if a node or way arrives after a relation. That's fatal;
    /// every later call fails the same way.
    pub fn process(&mut self, entity: Entity) -> Result<()> {
        if let (Phase::Aborted, Some(first_relation)) = (self.phase, self.first_relation) {
            return Err(OrderingViolation {
                entity: entity.id(),
                first_relation,
            }
            .into());
        }

        match entity {
            Entity::Node { id, lat, lon } => {
                self.check_order(OsmID::Node(id))?;
                self.store.put_node(id, lat, lon);
            }
            Entity::Way { id, nodes } => {
                self.check_order(OsmID::Way(id))?;
                self.store.put_way(id, nodes);
            }
            Entity::Relation(rel) => {
                if self.first_relation.is_none() {
                    self.first_relation = Some(rel.id);
                    self.phase = Phase::AssemblingRegions;
                }
                self.handle_relation(&rel);
            }
        }
        Ok(())
    }

    fn check_order(&mut self, id: OsmID) -> Result<()> {
        if let Some(first_relation) = self.first_relation {
            self.phase = Phase::Aborted;
            return Err(OrderingViolation {
                entity: id,
                first_relation,
            }
            .into());
        }
        Ok(())
    }

    fn handle_relation(&mut self, rel: &Relation) {
        // Anything that isn't a boundary at the right level is silently skipped
        let name = match qualifying_name(&rel.tags, self.opts.admin_level) {
            Some(name) => name,
            None => {
                return;
            }
        };
        info!("Found boundary relation for {}: {}", name, rel.id);

        match try_build_region(
            rel.id,
            name,
            &rel.way_members(),
            &self.store,
            self.opts.region_ids,
        ) {
            Ok(region) => {
                self.regions.push(region);
            }
            Err(incomplete) => {
                self.diagnostics.push(incomplete.into());
            }
        }
    }

    /// The stream is done. Hands back the store (needed to look up coordinates when writing) and
    /// the regions, plus everything that went wrong along the way.
    pub fn complete(self) -> Warn<Assembled, Diagnostic> {
        Warn::warnings(
            Assembled {
                store: self.store,
                regions: self.regions,
            },
            self.diagnostics,
        )
    }
}
