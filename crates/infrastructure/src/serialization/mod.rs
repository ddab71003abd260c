//! JSON serialization for files written by the client.
//!
//! Files are pretty-printed with 2-space indentation and a trailing
//! newline so they stay readable and diff cleanly.

mod json;

pub use json::*;
