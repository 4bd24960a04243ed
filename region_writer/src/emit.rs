use std::path::Path;

use regionutil::{Timer, Warn};

use crate::diagnostics::Diagnostic;
use crate::index::{poly_file_name, Index, IndexEntry, INDEX_FILE};
use crate::poly::{write_osmosis_polygon_file, LonLat};
use crate::region::Region;
use crate::store::EntityStore;
use crate::Options;

/// Look up the coordinates of every node in every ring. Nodes missing from the store leave a
/// gap in the ring.
pub fn resolve_rings(region: &Region, store: &EntityStore) -> Warn<Vec<Vec<LonLat>>, Diagnostic> {
    let mut warnings = Vec::new();
    let mut rings = Vec::new();
    for chain in &region.rings {
        let mut pts = Vec::new();
        for id in chain.nodes() {
            if let Some(node) = store.get_node(id) {
                pts.push(LonLat::new(node.lon, node.lat));
            } else {
                warnings.push(Diagnostic::MissingNode {
                    region: region.name.clone(),
                    node: id,
                });
            }
        }
        rings.push(pts);
    }
    Warn::warnings(rings, warnings)
}

/// Write `<region_id>.poly` for every region, then `regions.json` listing the ones that worked.
/// A failure for one region doesn't stop the others. The returned index has only the regions
/// whose file was written, even if the index itself couldn't be saved.
pub fn emit_regions(
    output_dir: &Path,
    regions: &[Region],
    store: &EntityStore,
    opts: &Options,
    timer: &mut Timer,
) -> Warn<Index, Diagnostic> {
    let mut warnings = Vec::new();
    let mut index = Index::new();

    timer.start_iter("write .poly files", regions.len());
    for region in regions {
        timer.next();
        let rings = resolve_rings(region, store).drain_into(&mut warnings);
        let path = output_dir.join(poly_file_name(&region.region_id));
        match write_osmosis_polygon_file(&path, &region.name, &rings) {
            Ok(()) => {
                index.regions.push(IndexEntry::new(
                    &region.region_id,
                    opts.admin_level,
                    &opts.locale,
                    &region.name,
                ));
            }
            Err(err) => {
                warnings.push(Diagnostic::PolyWriteFailed {
                    region: region.name.clone(),
                    path: path.display().to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    let path = output_dir.join(INDEX_FILE);
    if let Err(err) = index.write(&path) {
        warnings.push(Diagnostic::IndexWriteFailed {
            path: path.display().to_string(),
            error: err.to_string(),
        });
    }

    Warn::warnings(index, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;
    use crate::osm::{NodeID, RelationID};
    use crate::poly::read_osmosis_polygon;

    fn region(name: &str, region_id: &str, rings: Vec<Vec<i64>>) -> Region {
        Region {
            relation: RelationID(1),
            name: name.to_string(),
            region_id: region_id.to_string(),
            rings: rings
                .into_iter()
                .filter_map(|ids| Chain::new(ids.into_iter().map(NodeID).collect()))
                .collect(),
        }
    }

    fn store() -> EntityStore {
        let mut store = EntityStore::new();
        for id in 1..=10 {
            store.put_node(NodeID(id), 50.0 + (id as f64) / 8.0, 30.0 - (id as f64) / 4.0);
        }
        store
    }

    #[test]
    fn two_rings_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store();
        let regions = vec![region(
            "Two rings",
            "77",
            vec![vec![1, 2, 3, 1], vec![4, 5, 6, 7, 4]],
        )];
        let (index, warnings) = emit_regions(
            dir.path(),
            &regions,
            &store,
            &Options::default(),
            &mut Timer::throwaway(),
        )
        .into_parts();
        assert!(warnings.is_empty());
        assert_eq!(index.regions.len(), 1);

        let raw = std::fs::read_to_string(dir.path().join("77.poly")).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines[0], "Two rings");
        assert_eq!(lines[1], "1");
        assert_eq!(lines[6], "END");
        assert_eq!(lines[7], "2");
        assert_eq!(lines[13], "END");
        assert_eq!(lines[14], "END");
        assert_eq!(lines.len(), 15);

        let (name, rings) = read_osmosis_polygon(dir.path().join("77.poly")).unwrap();
        assert_eq!(name, "Two rings");
        let expected: Vec<Vec<LonLat>> = vec![vec![1, 2, 3, 1], vec![4, 5, 6, 7, 4]]
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|id| {
                        let n = store.get_node(NodeID(id)).unwrap();
                        LonLat::new(n.lon, n.lat)
                    })
                    .collect()
            })
            .collect();
        assert_eq!(rings, expected);

        assert_eq!(Index::read(dir.path().join(INDEX_FILE)).unwrap(), index);
    }

    #[test]
    fn missing_nodes_leave_gaps() {
        let store = store();
        let r = region("Gappy", "1", vec![vec![1, 99, 2, 1]]);
        let (rings, warnings) = resolve_rings(&r, &store).into_parts();
        assert_eq!(rings[0].len(), 3);
        assert_eq!(
            warnings,
            vec![Diagnostic::MissingNode {
                region: "Gappy".to_string(),
                node: NodeID(99),
            }]
        );
    }

    #[test]
    fn unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist");
        let regions = vec![
            region("A", "1", vec![vec![1, 2, 1]]),
            region("B", "2", vec![vec![3, 4, 3]]),
        ];
        let (index, warnings) = emit_regions(
            &missing,
            &regions,
            &store(),
            &Options::default(),
            &mut Timer::throwaway(),
        )
        .into_parts();
        assert!(index.regions.is_empty());
        assert_eq!(warnings.len(), 3);
        assert!(matches!(warnings[0], Diagnostic::PolyWriteFailed { .. }));
        assert!(matches!(warnings[1], Diagnostic::PolyWriteFailed { .. }));
        assert!(matches!(warnings[2], Diagnostic::IndexWriteFailed { .. }));
    }
}
