//! The log streaming filter/formatter engine.
//!
//! Turns one requested file into a lazy sequence of output chunks: resolve
//! the path inside the configured root, open it (decompressing
//! transparently), classify each line by its embedded severity token, drop
//! lines below the requested minimum, and render the survivors either
//! verbatim or as HTML. One line is in flight at a time, so memory stays
//! flat no matter how large the file is.

pub mod classify;
pub mod htmlify;
pub mod path;
pub mod pipeline;
pub mod reader;
pub mod render;

pub use path::ResolveError;
pub use pipeline::{ChunkStream, FilterOutcome, FilterRequest, run};
