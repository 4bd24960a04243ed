//! Extracts administrative boundary regions from an OSM extract. Every relation tagged
//! `boundary=administrative` at the requested `admin_level` becomes one Osmosis `.poly` file,
//! and a `regions.json` index lists them all.
//!
//! The input must list all nodes and ways before any relation, as OSM extracts normally do.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::path::Path;

use anyhow::Result;

use regionutil::{prettyprint_usize, Timer, Warn};

pub use crate::diagnostics::{Diagnostic, IncompleteRegion, OrderingViolation};
pub use crate::index::{Index, IndexEntry};
pub use crate::reader::Entity;
pub use crate::region::{Region, RegionIdScheme};
pub use crate::sink::{Assembled, Phase, RegionSink};

pub mod chain;
mod diagnostics;
pub mod emit;
pub mod index;
pub mod osm;
pub mod poly;
pub mod reader;
pub mod region;
mod sink;
pub mod store;

/// Configures which relations become regions and how they're written.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Relations must have exactly this `admin_level`. Also recorded in the index.
    pub admin_level: usize,
    /// The key for each region's name in the index
    pub locale: String,
    pub region_ids: RegionIdScheme,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            admin_level: 6,
            locale: "ru".to_string(),
            region_ids: RegionIdScheme::NameHash,
        }
    }
}

/// Feed every entity through a RegionSink. Stops at the first ordering violation; nothing
/// assembled so far is returned in that case.
pub fn assemble_regions(
    entities: Vec<Entity>,
    opts: &Options,
    timer: &mut Timer,
) -> Result<Warn<Assembled, Diagnostic>> {
    let mut sink = RegionSink::new(opts.clone());
    timer.start_iter("process entities", entities.len());
    for entity in entities {
        timer.next();
        sink.process(entity)?;
    }
    timer.note(format!(
        "Stored {} nodes and {} ways, assembled {} regions",
        prettyprint_usize(sink.store().num_nodes()),
        prettyprint_usize(sink.store().num_ways()),
        prettyprint_usize(sink.regions().len())
    ));
    Ok(sink.complete())
}

/// Read an .osm file and write every region's .poly file plus the index into `output_dir`.
/// Output is only written once the whole input has been consumed, so a fatal error leaves no
/// files behind. Recoverable problems are reported through the timer.
pub fn run(input: &str, output_dir: &str, opts: &Options, timer: &mut Timer) -> Result<Index> {
    let entities = reader::read(input, timer)?;
    let assembled = assemble_regions(entities, opts, timer)?.get(timer);

    fs_err::create_dir_all(output_dir)?;
    timer.start("write regions");
    let index = emit::emit_regions(
        Path::new(output_dir),
        &assembled.regions,
        &assembled.store,
        opts,
        timer,
    )
    .get(timer);
    timer.stop("write regions");
    Ok(index)
}
