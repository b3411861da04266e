//! API data models
//!
//! This module contains the listing response structures and the stored
//! quotation rows they are built from.

pub mod listing;
pub mod quotation;
