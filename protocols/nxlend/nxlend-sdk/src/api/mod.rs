pub mod registry;

// Re-export registry functions for convenience
pub use registry::{find_token, lookup_token, HttpTokenRegistry, TokenRegistry};
