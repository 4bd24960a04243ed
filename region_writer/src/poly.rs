//! The [Osmosis polygon filter file
//! format](https://wiki.openstreetmap.org/wiki/Osmosis/Polygon_Filter_File_Format): a name line,
//! then numbered sections of `lon lat` lines each ending with `END`, then a final `END`.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

// longitude is x, latitude is y
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }
}

/// Sections are numbered from 1, in the order given. Coordinates use the shortest formatting that
/// parses back to the same f64.
pub fn write_osmosis_polygon<W: Write>(
    mut w: W,
    name: &str,
    rings: &[Vec<LonLat>],
) -> std::io::Result<()> {
    writeln!(w, "{}", name)?;
    for (idx, ring) in rings.iter().enumerate() {
        writeln!(w, "{}", idx + 1)?;
        for pt in ring {
            writeln!(w, "{} {}", pt.longitude, pt.latitude)?;
        }
        writeln!(w, "END")?;
    }
    writeln!(w, "END")?;
    w.flush()
}

pub fn write_osmosis_polygon_file<P: AsRef<Path>>(
    path: P,
    name: &str,
    rings: &[Vec<LonLat>],
) -> Result<()> {
    let file = fs_err::File::create(path.as_ref())?;
    write_osmosis_polygon(std::io::BufWriter::new(file), name, rings)?;
    Ok(())
}

/// Returns the name and every section. Section labels aren't checked, and a `!` prefix (marking
/// a hole in the full format) is ignored. Coordinates may be separated by any whitespace.
pub fn parse_osmosis_polygon(raw: &str) -> Result<(String, Vec<Vec<LonLat>>)> {
    let mut lines = raw.lines();
    let name = match lines.next() {
        Some(line) => line.to_string(),
        None => bail!("empty polygon file"),
    };

    let mut rings = Vec::new();
    let mut current: Option<Vec<LonLat>> = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "END" {
            match current.take() {
                Some(ring) => rings.push(ring),
                None => return Ok((name, rings)),
            }
            continue;
        }
        match current {
            None => {
                // A section label
                current = Some(Vec::new());
            }
            Some(ref mut ring) => {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() != 2 {
                    bail!("bad coordinate line in polygon file: {}", line);
                }
                ring.push(LonLat::new(parts[0].parse()?, parts[1].parse()?));
            }
        }
    }
    bail!("polygon file is missing the final END")
}

pub fn read_osmosis_polygon<P: AsRef<Path>>(path: P) -> Result<(String, Vec<Vec<LonLat>>)> {
    parse_osmosis_polygon(&fs_err::read_to_string(path.as_ref())?)
}
