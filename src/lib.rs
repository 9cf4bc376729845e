//! Weighted media selection for a digital photo frame.
//!
//! This crate owns everything between the synced `db.json` catalog and the
//! display: loading and partitioning the catalog, deciding when to re-read
//! it, and drawing the next record with favorites weighted up.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod refresh;
pub mod sampler;
pub mod session;

pub use error::Error;
