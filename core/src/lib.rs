//! Core logic for the crypto price tracker: request routing and validation,
//! the price lookup and search history flows, and the collaborator clients
//! (parameter store, price feed, record store, email). Transport-agnostic:
//! frontends hand in `(method, path, body)` and copy the envelope out.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod router;
pub mod state;

pub use response::{ApiResponse, CORS_HEADERS};
pub use router::handle;
pub use state::AppState;
