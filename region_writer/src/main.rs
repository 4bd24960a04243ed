#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use region_writer::{Options, RegionIdScheme};
use regionutil::{prettyprint_usize, Timer};

#[derive(StructOpt)]
#[structopt(
    name = "region_writer",
    about = "Writes an Osmosis .poly boundary for every administrative region in an .osm file"
)]
struct Flags {
    /// The path to an .osm XML file. Nodes and ways must come before relations.
    #[structopt()]
    input: String,
    /// The directory to write .poly files and regions.json into
    #[structopt(long, default_value = ".")]
    output_dir: String,
    /// Only relations with this admin_level are extracted
    #[structopt(long, default_value = "6")]
    admin_level: usize,
    /// The locale code to file each region's name under in regions.json
    #[structopt(long, default_value = "ru")]
    locale: String,
    /// Name output files by the boundary relation's ID, instead of a hash of the region's name.
    /// Hashes are compatible with older output, but two regions can collide.
    #[structopt(long)]
    id_from_relation: bool,
}

fn main() -> Result<()> {
    regionutil::logger::setup();
    let flags = Flags::from_args();

    let opts = Options {
        admin_level: flags.admin_level,
        locale: flags.locale,
        region_ids: if flags.id_from_relation {
            RegionIdScheme::RelationId
        } else {
            RegionIdScheme::NameHash
        },
    };

    let mut timer = Timer::new(format!("extract regions from {}", flags.input));
    let index = region_writer::run(&flags.input, &flags.output_dir, &opts, &mut timer)?;
    info!(
        "Wrote {} regions to {}",
        prettyprint_usize(index.regions.len()),
        flags.output_dir
    );
    Ok(())
}
