//! Row structs and request DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` row struct, a create DTO
//! and an all-`Option` update DTO.

pub mod measurement_record;
