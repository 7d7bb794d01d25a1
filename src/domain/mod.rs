//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared validation error
//! - `contract` - Contract drafting: prompt, reply resolution, fallbacks
//! - `anchoring` - Content ids, wallet addresses and the anchor transaction

pub mod anchoring;
pub mod contract;
pub mod foundation;
