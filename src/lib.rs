//! pairsheet-service: a key-value REST facade over a single Google spreadsheet.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
