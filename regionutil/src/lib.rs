//! Small helpers shared by the region extraction tools: logging setup, values that carry
//! warnings along with them, a phase timer, and OSM tag handling.

#[macro_use]
extern crate log;

pub mod logger;
mod logs;
mod tags;
mod time;

pub use crate::logs::Warn;
pub use crate::tags::Tags;
pub use crate::time::{elapsed_seconds, prettyprint_time, prettyprint_usize, Timer};

const PROGRESS_FREQUENCY_SECONDS: f64 = 0.2;
