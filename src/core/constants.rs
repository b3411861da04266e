//! Constants for response messages and stored value labels
//!
//! This module defines the string constants shared by the grouping logic
//! and the HTTP handlers.

/// Response envelope messages
pub mod message {
    /// Listing built from at least one row
    pub const LISTING_LOADED: &str = "Provider listing loaded successfully";

    /// Quotation version has no quoted products
    pub const NO_DATA: &str = "No data found for the requested quotation version";

    /// Path ids are not integers
    pub const INVALID_IDS: &str = "Quotation and version ids must be integers";

    /// Prefix for repository failures
    pub const LOAD_FAILED: &str = "Failed to load quotation data";
}

/// Currency symbols as stored on quotation rows
pub mod currency {
    /// Peruvian soles
    pub const SOLES_SYMBOL: &str = "S/.";
}

/// Placeholder for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";
