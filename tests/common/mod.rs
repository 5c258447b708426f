#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from docscan for tests
pub use docscan::{DocumentScanner, Quad, ScanConfig, ScanError};
