//! Shared response envelope types for API handlers.

use atividades_core::pagination::{PageRequest, PaginationMeta};
use serde::Serialize;

/// One page of items plus its metadata: `{ "items": [...], "pagination": {...} }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Body of a list endpoint.
///
/// Without a `page` query parameter the full collection is returned as a bare
/// JSON array; with one, the [`Paginated`] envelope is returned.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Listing<T: Serialize> {
    All(Vec<T>),
    Page(Paginated<T>),
}

impl<T: Serialize> Listing<T> {
    /// Build the listing for `items`, which must already be the requested page.
    pub fn new(items: Vec<T>, page: Option<PageRequest>, total_count: i64) -> Self {
        match page {
            Some(page) => Listing::Page(Paginated {
                items,
                pagination: PaginationMeta::new(page, total_count),
            }),
            None => Listing::All(items),
        }
    }
}

/// `{ "message": "..." }` body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
