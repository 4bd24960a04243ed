use std::collections::HashSet;

use anyhow::{Context, Result};

use regionutil::{prettyprint_usize, Tags, Timer};

use crate::osm::{NodeID, OsmID, RelationID, WayID};

// Per https://wiki.openstreetmap.org/wiki/OSM_XML#Certainties_and_Uncertainties, elements should
// come in order: nodes, ways, then relations. The reader doesn't check that; it just reports what
// the file contains, in document order, and the consumer decides what to do about disorder.

/// One record of the entity stream.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Node { id: NodeID, lat: f64, lon: f64 },
    Way { id: WayID, nodes: Vec<NodeID> },
    Relation(Relation),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub id: RelationID,
    pub tags: Tags,
    pub members: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    /// Kept for inspection only. Assembly treats outer and inner ways alike.
    pub role: String,
    pub id: OsmID,
}

impl Entity {
    pub fn id(&self) -> OsmID {
        match self {
            Entity::Node { id, .. } => OsmID::Node(*id),
            Entity::Way { id, .. } => OsmID::Way(*id),
            Entity::Relation(r) => OsmID::Relation(r.id),
        }
    }
}

impl Relation {
    /// The way members, in relation order. Node and sub-relation members are skipped.
    pub fn way_members(&self) -> Vec<WayID> {
        self.members
            .iter()
            .filter_map(|m| match m.id {
                OsmID::Way(w) => Some(w),
                _ => None,
            })
            .collect()
    }
}

pub fn read(path: &str, timer: &mut Timer) -> Result<Vec<Entity>> {
    timer.start(format!("read {}", path));
    let raw_string = fs_err::read_to_string(path)?;
    timer.stop(format!("read {}", path));

    timer.start("scrape objects");
    let entities = parse(&raw_string).with_context(|| format!("parsing {}", path))?;
    timer.stop("scrape objects");

    let (mut nodes, mut ways, mut relations) = (0, 0, 0);
    for e in &entities {
        match e {
            Entity::Node { .. } => nodes += 1,
            Entity::Way { .. } => ways += 1,
            Entity::Relation(_) => relations += 1,
        }
    }
    timer.note(format!(
        "Found {} nodes, {} ways, {} relations",
        prettyprint_usize(nodes),
        prettyprint_usize(ways),
        prettyprint_usize(relations)
    ));

    Ok(entities)
}

/// Scrape every node, way, and relation out of an OSM XML document. Anything else (bounds,
/// changesets, tags on nodes and ways) is ignored.
pub fn parse(raw_string: &str) -> Result<Vec<Entity>> {
    let tree = roxmltree::Document::parse(raw_string)?;

    let mut seen: HashSet<OsmID> = HashSet::new();
    let mut entities = Vec::new();
    for obj in tree.descendants() {
        if !obj.is_element() {
            continue;
        }
        let entity = match obj.tag_name().name() {
            "node" => Entity::Node {
                id: NodeID(parse_attr(obj, "id")?),
                lat: parse_attr(obj, "lat")?,
                lon: parse_attr(obj, "lon")?,
            },
            "way" => {
                let mut nodes = Vec::new();
                for child in obj.children() {
                    if child.tag_name().name() == "nd" {
                        nodes.push(NodeID(parse_attr(child, "ref")?));
                    }
                }
                Entity::Way {
                    id: WayID(parse_attr(obj, "id")?),
                    nodes,
                }
            }
            "relation" => {
                let mut members = Vec::new();
                for child in obj.children() {
                    if child.tag_name().name() != "member" {
                        continue;
                    }
                    let r = parse_attr(child, "ref")?;
                    let id = match attr(child, "type")? {
                        "node" => OsmID::Node(NodeID(r)),
                        "way" => OsmID::Way(WayID(r)),
                        "relation" => OsmID::Relation(RelationID(r)),
                        _ => continue,
                    };
                    members.push(Member {
                        role: child.attribute("role").unwrap_or("").to_string(),
                        id,
                    });
                }
                Entity::Relation(Relation {
                    id: RelationID(parse_attr(obj, "id")?),
                    tags: read_tags(obj)?,
                    members,
                })
            }
            _ => continue,
        };

        let id = entity.id();
        if !seen.insert(id) {
            bail!("Duplicate {}, your .osm is corrupt", id);
        }
        entities.push(entity);
    }
    Ok(entities)
}

fn attr<'a>(obj: roxmltree::Node<'a, '_>, key: &str) -> Result<&'a str> {
    obj.attribute(key).ok_or_else(|| {
        anyhow!(
            "<{}> at byte {} is missing {}",
            obj.tag_name().name(),
            obj.range().start,
            key
        )
    })
}

fn parse_attr<T>(obj: roxmltree::Node, key: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = attr(obj, key)?;
    raw.parse::<T>()
        .with_context(|| format!("bad {}=\"{}\" on <{}>", key, raw, obj.tag_name().name()))
}

fn read_tags(obj: roxmltree::Node) -> Result<Tags> {
    let mut tags = Tags::empty();
    for child in obj.children() {
        if child.tag_name().name() == "tag" {
            tags.insert(attr(child, "k")?, attr(child, "v")?);
        }
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_order_is_preserved() {
        let entities = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bounds minlat="0" minlon="0" maxlat="1" maxlon="1"/>
  <node id="1" lat="55.5" lon="37.25"><tag k="place" v="town"/></node>
  <way id="10"><nd ref="1"/><nd ref="2"/></way>
  <relation id="100">
    <member type="way" ref="10" role="outer"/>
    <member type="node" ref="1" role="admin_centre"/>
    <member type="area" ref="5" role=""/>
    <tag k="name" v="Somewhere"/>
  </relation>
</osm>"#,
        )
        .unwrap();

        assert_eq!(entities.len(), 3);
        assert_eq!(
            entities[0],
            Entity::Node {
                id: NodeID(1),
                lat: 55.5,
                lon: 37.25
            }
        );
        assert_eq!(
            entities[1],
            Entity::Way {
                id: WayID(10),
                nodes: vec![NodeID(1), NodeID(2)]
            }
        );
        match &entities[2] {
            Entity::Relation(r) => {
                assert_eq!(r.id, RelationID(100));
                assert_eq!(r.members.len(), 2);
                assert_eq!(r.way_members(), vec![WayID(10)]);
                assert!(r.tags.is("name", "Somewhere"));
            }
            x => panic!("expected a relation, got {:?}", x),
        }
    }

    #[test]
    fn duplicates_are_corrupt() {
        let err = parse(r#"<osm><node id="1" lat="0" lon="0"/><node id="1" lat="1" lon="1"/></osm>"#)
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn bad_coordinates_fail() {
        assert!(parse(r#"<osm><node id="1" lat="north" lon="0"/></osm>"#).is_err());
        assert!(parse(r#"<osm><node id="1" lon="0"/></osm>"#).is_err());
    }
}
