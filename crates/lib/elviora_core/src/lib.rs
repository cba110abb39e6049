//! # elviora_core
//!
//! Core domain logic for the Elviora chat relay: the product-context cache,
//! prompt assembly and the completion gateway.

pub mod clock;
pub mod completion;
pub mod config;
pub mod products;
pub mod prompt;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
