// Pokedex Browser Schema - Shared record definitions
// This crate contains the wire-facing record types and the small shared enums
// used by the browser library, its binaries and their tests.

// Re-export the main types
pub use record::*;
pub use severity::*;

pub mod record;
pub mod severity;
