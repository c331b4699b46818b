//! Core traits defined in `schoolhub-core` and implemented by other crates.

pub mod storage;

pub use storage::KeyValueStore;
