//! Anchoring handlers.

mod anchor_service;

pub use anchor_service::{
    AnchorError, AnchorReceipt, AnchorService, CONFIRMATION_ROUNDS, FALLBACK_GENESIS_ID,
};
