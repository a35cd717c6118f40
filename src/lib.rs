//! # kasane
//!
//! This crate is a source map mapping engine: the in-memory model behind
//! the `mappings` field of JavaScript source map v3 documents, with a VLQ
//! text codec, offset-based merging for map concatenation, and a compact
//! binary interchange format.
//!
//! ## Getting Started
//!
//! ```
//! use kasane::MappingContainer;
//!
//! let mut map = MappingContainer::new();
//! map.add_raw_mappings("AAAA;AACA", vec!["a.js".into()], vec![], 0, 0).unwrap();
//!
//! // append a second map below the first one
//! map.add_raw_mappings("AAAA", vec!["b.js".into()], vec![], 2, 0).unwrap();
//!
//! map.sort();
//! let out = map.stringify().unwrap();
//! assert_eq!(out.mappings, "AAAA;AACA;ACDA");
//! assert_eq!(out.sources, ["a.js", "b.js"]);
//! ```
//!
//! ## Overview
//!
//! ### `MappingContainer`
//!
//! [MappingContainer] holds one [MappingLine] per generated line, two
//! interned [StringPool]s for sources and names, and the extent counters.
//! Maps are pulled in through [add_raw_mappings](MappingContainer::add_raw_mappings)
//! (VLQ text) or [add_buffer_mappings](MappingContainer::add_buffer_mappings)
//! (binary), both of which accept line/column offsets so a bundler can
//! stack many maps into a single namespace. Output goes the other way
//! through [stringify](MappingContainer::stringify),
//! [to_buffer](MappingContainer::to_buffer), and
//! [get_map](MappingContainer::get_map).
//!
//! ### `Position` and `Mapping`
//!
//! [Position] is a zero-based line/column pair; [Mapping] is one segment
//! of the `mappings`, carrying a generated position and optionally an
//! original position, source index, and name index.
//!
//! ### Binary format
//!
//! [to_buffer](MappingContainer::to_buffer) writes a tagged flat
//! little-endian layout: the two pools as length-prefixed string vectors,
//! the line count, and every non-empty line with its sorted flag and raw
//! segments. Merging a buffer back is a straight walk over that layout,
//! far cheaper than re-parsing VLQ text.

mod buffer;
mod container;
mod error;
mod line;
mod mapping;
mod mappings;
mod pool;
mod splitter;
mod vlq;

pub use container::*;
pub use error::*;
pub use line::*;
pub use mapping::*;
pub use mappings::*;
pub use pool::*;
