//! Ordered JSON document primitives used by the ONC import pipeline.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, parse_bytes, parse_file, ParseError};
pub use serde_json::{json, Value};
pub use tree::{Object, ObjectExt, EMPTY_UNENCRYPTED_CONFIGURATION};
pub use writer::{write, write_file, WriteError};
