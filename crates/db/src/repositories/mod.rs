//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod measurement_record_repo;

pub use measurement_record_repo::MeasurementRecordRepo;
