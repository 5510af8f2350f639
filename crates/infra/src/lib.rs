//! Infrastructure layer: grant-store adapters and seed data.

pub mod defaults;
pub mod grant_store;

#[cfg(test)]
mod integration_tests;

pub use defaults::{default_role_grants, default_role_name, seed_role};
pub use grant_store::{InMemoryGrantStore, PostgresGrantStore};
