//! Token recognizers, one family per file. Each is an inherent method on
//! `Scanner` driven by the dispatcher in `scanner.rs`.

mod comment;
mod html;
mod mustache;
mod raw_text;
mod text;

#[cfg(feature = "internal-api")]
pub use html::scan_tag_name;
