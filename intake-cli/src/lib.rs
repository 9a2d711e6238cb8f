// All extraction functionality is in intake-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod adhoc;
pub mod store_locator;

// Re-export core types for convenience
pub use intake_core::*;

// Re-export CLI utilities
pub use adhoc::AdhocSpec;
pub use store_locator::StoreLocator;
