use std::{error, fmt};

use crate::osm::{NodeID, OsmID, RelationID, WayID};

/// A node or way showed up after the first relation. The store can't be trusted to be complete
/// for the relations that follow, so the whole run stops.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderingViolation {
    pub entity: OsmID,
    pub first_relation: RelationID,
}

impl fmt::Display for OrderingViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Input must list relations after all nodes and ways, but {} comes after {}",
            self.entity, self.first_relation
        )
    }
}

impl error::Error for OrderingViolation {}

/// A boundary relation references a way that isn't in the input.
#[derive(Clone, Debug, PartialEq)]
pub struct IncompleteRegion {
    pub relation: RelationID,
    pub name: String,
    pub missing_way: WayID,
}

impl fmt::Display for IncompleteRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Region {} ({}) incomplete, missing {}",
            self.name, self.relation, self.missing_way
        )
    }
}

impl error::Error for IncompleteRegion {}

/// Something that went wrong but didn't stop the run. These are collected and handed back along
/// with results, instead of only being logged.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The region was dropped.
    IncompleteRegion(IncompleteRegion),
    /// The node was skipped in the ring; the file was still written.
    MissingNode { region: String, node: NodeID },
    /// The region's .poly file couldn't be written, so it's also left out of the index.
    PolyWriteFailed {
        region: String,
        path: String,
        error: String,
    },
    IndexWriteFailed { path: String, error: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::IncompleteRegion(x) => write!(f, "{}", x),
            Diagnostic::MissingNode { region, node } => {
                write!(f, "Node for {} not found. Region {}", node, region)
            }
            Diagnostic::PolyWriteFailed {
                region,
                path,
                error,
            } => write!(f, "Can't write {} for {}: {}", path, region, error),
            Diagnostic::IndexWriteFailed { path, error } => {
                write!(f, "Can't write {}: {}", path, error)
            }
        }
    }
}

impl From<IncompleteRegion> for Diagnostic {
    fn from(x: IncompleteRegion) -> Diagnostic {
        Diagnostic::IncompleteRegion(x)
    }
}
