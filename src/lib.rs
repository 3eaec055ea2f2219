// In: src/lib.rs

//! Pokedex Browser
//!
//! Browse the Tyradex Pokémon index: a filterable list view, a detail view
//! with type-effectiveness chips, and previous/next navigation between
//! records. The remote API is read-only and fetched once per view session.

// --- MODULE DECLARATIONS ---
pub mod browser_interface;
pub mod catalog;
pub mod client;
pub mod config;
pub mod display;
pub mod effectiveness;
pub mod errors;
pub mod logging;
pub mod navigation;
pub mod session;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Ability, CatalogRecord, Direction, Evolution, EvolutionLink, LocalizedNames, Physical,
    RecordId, Resistance, Severity, Sprites, Stats, TypeTag, PLACEHOLDER_ID,
};

// --- From this crate's modules (`src/`) ---

// The pure core: filtering, type index, classification, navigation.
pub use catalog::{filter_records, type_index, CatalogFilter};
pub use effectiveness::{classify, legend, type_color, Classification, LegendRow};
pub use navigation::navigate;

// Remote source and view sessions.
pub use client::{CatalogSource, HttpCatalogSource};
pub use session::{DetailSession, ListSession, ListView, LoadState};

// Configuration, error and result types.
pub use config::BrowserConfig;
pub use errors::{BrowserError, BrowserResult};
