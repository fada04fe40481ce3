//! Outbound adapters implementing the domain ports.

pub mod email;
pub mod memory;
pub mod persistence;
pub mod security;
pub mod token_store;
