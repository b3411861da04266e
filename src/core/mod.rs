//! Core application modules
//!
//! This module contains configuration, constants, logging, and the
//! quotation data sources.

pub mod config;
pub mod constants;
pub mod logging;
pub mod repositories;
pub mod repository;
