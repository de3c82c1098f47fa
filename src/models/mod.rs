//! serde mirrors of the Google Slides REST resources this crate reads and writes.
//!
//! The read side (`presentation`, `page`, `elements`, `placeholder`) only carries the
//! fields needed to locate placeholders, layouts and speaker notes. The write side
//! (`requests` and the property structs it embeds) serializes to the exact JSON shape
//! accepted by `presentations.batchUpdate`.

pub mod colors;
pub mod common;
pub mod elements;
pub mod line;
pub mod page;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod requests;
pub mod shape;
pub mod shape_properties;
pub mod table_properties;
