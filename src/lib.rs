//! Countrysrv - country list, detail and map service
//!
//! This library provides the country data pipeline behind countrysrv:
//! fetching countries from the REST Countries API, sorting, searching and
//! paginating them, resolving single countries by code, and projecting
//! them onto map coordinates.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
