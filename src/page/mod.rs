// src/page/mod.rs
// =============================================================================
// Turning a downloaded page into something the crawler can use.
//
// Submodules:
// - decode: raw bytes in whatever charset the server declared -> UTF-8 text
// - links: UTF-8 HTML -> absolute URLs of every anchor on the page
// =============================================================================

mod decode;
mod links;

pub use decode::{decode, is_textual};
pub use links::extract_links;
