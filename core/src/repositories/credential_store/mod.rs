//! Credential store repository module.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

mod memory;

pub use memory::{InMemoryCredentialStore, InMemoryStoreConfig};
pub use r#trait::CredentialStore;

#[cfg(test)]
mod tests;
