// src/config/mod.rs
// =============================================================================
// Everything that has to be read and validated before the crawl starts:
// - settings: the spider.yaml file (depth, interval, timeout, pattern, workers)
// - seeds: the JSON list of start URLs
//
// Any failure here is fatal; main exits with a non-zero code.
// =============================================================================

mod seeds;
mod settings;

pub use seeds::load_seeds;
pub use settings::{compile_target_pattern, SpiderConfig, CONFIG_FILE_NAME};
