//! Outbound (driven) adapters.

pub mod memory;
pub mod persistence;

pub use memory::MemoryStore;
