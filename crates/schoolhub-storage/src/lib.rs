//! # schoolhub-storage
//!
//! Durable key-value backends for SchoolHub. Supports two modes:
//!
//! - **local**: one JSON file per key under a root directory
//! - **memory**: process-local map, for tests and throwaway runs
//!
//! The backend is selected at runtime based on configuration.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
