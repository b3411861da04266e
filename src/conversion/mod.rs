//! Row to response conversion
//!
//! This module turns flat quotation rows into the provider listing.

pub mod grouping;
