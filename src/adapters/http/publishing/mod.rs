//! Publishing HTTP adapter - document pinning and ledger relay endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PublishingAppState;
pub use routes::publishing_router;
