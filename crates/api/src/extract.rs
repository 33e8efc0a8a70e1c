//! Request extractors shared by handlers.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections become [`AppError`] 400 responses.
///
/// Drop-in replacement for [`axum::Json`] in handler arguments: malformed
/// JSON, a wrong field type or a missing `Content-Type` all produce the
/// standard `{error, code}` body instead of axum's plain-text 415/422.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
