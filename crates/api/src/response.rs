//! Shared response envelope types for API handlers.
//!
//! Knowledge Base and estimation endpoints use the `{ "data": ... }`
//! envelope. Record mutations answer `{ "message": ..., "data": ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }` envelope returned by record mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}
