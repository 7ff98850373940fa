use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections go through [`AppError`]
///
/// Bodies that fail to deserialize (wrong types, out-of-range integers,
/// missing fields) come back as a 400 with the usual `{"error": ..}` body
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
