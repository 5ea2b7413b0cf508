// src/config/seeds.rs
// =============================================================================
// Loads the seed list: a JSON array of absolute URLs, e.g.
//
//   ["http://www.baidu.com", "http://www.sina.com.cn"]
//
// Duplicates are kept on purpose. The dedup gate makes sure a repeated seed
// is only fetched once.
// =============================================================================

use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Reads the seed file. An empty list is an error.
pub fn load_seeds(path: &Path) -> Result<Vec<String>, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let seeds = parse_seeds(&data, path)?;
    debug!(count = seeds.len(), path = %path.display(), "loaded seeds");
    Ok(seeds)
}

fn parse_seeds(data: &str, path: &Path) -> Result<Vec<String>, ConfigError> {
    let raw: Vec<String> = serde_json::from_str(data).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let seeds: Vec<String> = raw
        .into_iter()
        .map(|seed| seed.trim().to_string())
        .filter(|seed| !seed.is_empty())
        .collect();

    if seeds.is_empty() {
        return Err(ConfigError::NoSeeds(path.to_path_buf()));
    }
    Ok(seeds)
}
