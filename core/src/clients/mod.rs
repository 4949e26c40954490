//! Collaborator clients. Each external service is reached through a trait so
//! the flows can be exercised with in-memory implementations.

pub mod notifier;
pub mod price_feed;
pub mod records;
pub mod secrets;
