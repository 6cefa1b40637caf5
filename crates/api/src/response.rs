//! The `{ "data": ... }` envelope every successful response uses.
//!
//! Errors use the `{ "error", "code" }` shape produced by
//! [`crate::error::AppError`]; the two shapes never mix.

use serde::Serialize;

/// Successful-response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
