//! Contract HTTP adapter - drafting and export endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContractAppState;
pub use routes::contract_router;
