use regionutil::Tags;

use crate::chain::{Chain, ChainMerger};
use crate::diagnostics::IncompleteRegion;
use crate::osm::{self, RelationID, WayID};
use crate::store::EntityStore;

/// One administrative boundary, assembled from its relation's ways. The rings are in assembly
/// order; nothing distinguishes outer rings from holes, and rings that never closed are kept
/// as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub relation: RelationID,
    pub name: String,
    pub region_id: String,
    pub rings: Vec<Chain>,
}

/// How to name a region's output files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionIdScheme {
    /// A 32-bit hash of the name, the same as Java's `String.hashCode`, so identifiers match the
    /// files produced by the osmosis region writer plugin. Two names with the same hash will
    /// overwrite each other.
    NameHash,
    /// The source relation's ID. Never collides.
    RelationId,
}

impl RegionIdScheme {
    pub fn region_id(self, relation: RelationID, name: &str) -> String {
        match self {
            RegionIdScheme::NameHash => name_hash(name).to_string(),
            RegionIdScheme::RelationId => relation.0.to_string(),
        }
    }
}

/// s[0]*31^(n-1) + s[1]*31^(n-2) + ... + s[n-1] over UTF-16 code units, wrapping.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)))
}

/// A relation is a region candidate if it's tagged `boundary=administrative` at the requested
/// `admin_level` and has a name. Returns that name.
pub fn qualifying_name<'a>(tags: &'a Tags, admin_level: usize) -> Option<&'a str> {
    if !tags.is(osm::BOUNDARY, osm::ADMINISTRATIVE)
        || !tags.is(osm::ADMIN_LEVEL, &admin_level.to_string())
    {
        return None;
    }
    tags.get(osm::NAME).map(|x| x.as_str())
}

/// Glue all of the member ways into rings. If any way isn't in the store, the whole region is
/// unusable.
pub fn try_build_region(
    relation: RelationID,
    name: &str,
    way_members: &[WayID],
    store: &EntityStore,
    ids: RegionIdScheme,
) -> Result<Region, IncompleteRegion> {
    let mut merger = ChainMerger::new();
    for id in way_members {
        match store.get_way(*id) {
            Some(way) => merger.insert(way.nodes.clone()),
            None => {
                return Err(IncompleteRegion {
                    relation,
                    name: name.to_string(),
                    missing_way: *id,
                });
            }
        }
    }

    Ok(Region {
        relation,
        name: name.to_string(),
        region_id: ids.region_id(relation, name),
        rings: merger.into_chains(),
    })
}
