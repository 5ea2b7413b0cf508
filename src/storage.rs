// src/storage.rs
// =============================================================================
// Saves pages to the output directory, one file per URL.
//
// The file name is the URL in query-string escaping: every '/', ':', '?' and
// so on becomes a %XX sequence. This is reversible, so two different URLs can
// never share a file, and the name never contains a path separator, so it
// can't escape the output directory.
//
//   http://a.test/x?y=1  ->  http%3A%2F%2Fa.test%2Fx%3Fy%3D1
// =============================================================================

use std::path::{Path, PathBuf};
use url::form_urlencoded;

use crate::error::PersistError;

/// Escapes `url` into a file name.
pub fn file_name_for(url: &str) -> Result<String, PersistError> {
    let name: String = form_urlencoded::byte_serialize(url.as_bytes()).collect();
    // "." and ".." survive escaping but name directories, not files
    if name.is_empty() || name == "." || name == ".." {
        return Err(PersistError::UnusableName(url.to_string()));
    }
    Ok(name)
}

/// Writes `body` to `output_dir`, replacing any earlier copy of the same URL.
pub async fn save_page(body: &[u8], url: &str, output_dir: &Path) -> Result<PathBuf, PersistError> {
    let path = output_dir.join(file_name_for(url)?);
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| PersistError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
