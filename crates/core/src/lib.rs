//! Domain logic for the fine-tuning energy & emissions dashboard.
//!
//! Everything in this crate is pure: reference catalogs and measurement
//! tables, the region carbon-intensity parser, the estimation engine, and the
//! record table view state. I/O lives in the `db` and `api` crates.

pub mod carbon_intensity;
pub mod catalog;
pub mod error;
pub mod estimation;
pub mod format;
pub mod knowledge_base;
pub mod record;
pub mod record_view;
pub mod reference;
pub mod types;
