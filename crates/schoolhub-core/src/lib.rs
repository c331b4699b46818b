//! # schoolhub-core
//!
//! Core crate for SchoolHub. Contains configuration schemas, typed
//! identifiers, the durable key-value storage trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other SchoolHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
