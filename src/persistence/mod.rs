//! File persistence with corruption detection
//!
//! Features:
//! - JSON documents and single-number text records
//! - Atomic replace (write tmp, then rename over the target)
//! - Missing files reported as `None`, corrupt files as typed errors, so
//!   callers decide how to fall back

pub mod storage;

pub use storage::{PersistError, read_json, read_number, write_json, write_number};
