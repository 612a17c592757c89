pub mod catalog;
pub mod estimation;
pub mod records;
