use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const INDEX_FILE: &str = "regions.json";
pub const INDEX_VERSION: usize = 1;

/// The `regions.json` written next to the .poly files, describing every region that was
/// successfully written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub version: usize,
    pub regions: Vec<IndexEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "region-id")]
    pub region_id: String,
    #[serde(rename = "admin-level")]
    pub admin_level: usize,
    #[serde(rename = "poly-file")]
    pub poly_file: String,
    /// Locale code to name
    pub names: BTreeMap<String, String>,
}

impl Index {
    pub fn new() -> Index {
        Index {
            version: INDEX_VERSION,
            regions: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs_err::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Index> {
        Ok(serde_json::from_str(&fs_err::read_to_string(
            path.as_ref(),
        )?)?)
    }
}

impl Default for Index {
    fn default() -> Index {
        Index::new()
    }
}

impl IndexEntry {
    pub fn new(region_id: &str, admin_level: usize, locale: &str, name: &str) -> IndexEntry {
        let mut names = BTreeMap::new();
        names.insert(locale.to_string(), name.to_string());
        IndexEntry {
            region_id: region_id.to_string(),
            admin_level,
            poly_file: poly_file_name(region_id),
            names,
        }
    }
}

pub fn poly_file_name(region_id: &str) -> String {
    format!("{}.poly", region_id)
}
