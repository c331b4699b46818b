//! Key-value backend implementations.

#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "local")]
pub use local::LocalKeyValueStore;
#[cfg(feature = "memory")]
pub use memory::MemoryKeyValueStore;
