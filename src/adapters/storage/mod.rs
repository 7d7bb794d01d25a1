//! Storage Adapters
//!
//! Implementations of the ContentStorage port.
//!
//! ## Available Adapters
//!
//! - **PinataStorage** - Pins documents to IPFS through Pinata
//! - **InMemoryContentStorage** - Keeps documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryContentStorage, PinataConfig, PinataStorage};
//!
//! // Production: Pinata
//! let storage = PinataStorage::new(PinataConfig::new(jwt))?;
//!
//! // Testing: in-memory storage
//! let storage = InMemoryContentStorage::new();
//! ```

mod in_memory;
mod pinata;

pub use in_memory::{InMemoryContentStorage, StoredObject};
pub use pinata::{PinataConfig, PinataStorage, DEFAULT_PINATA_BASE_URL};
