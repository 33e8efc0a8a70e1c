//! Query parameter types for list endpoints.
//!
//! Numeric parameters arrive as strings and are parsed leniently: a value
//! that does not parse is ignored rather than rejected.

use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use serde::Deserialize;

/// Pagination parameters (`?page=&per_page=`).
///
/// Pagination is enabled only when `page` is present and non-blank; see
/// [`PageRequest::from_params`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageParams {
    /// Resolve into a page request using the endpoint's default page size.
    pub fn page_request(&self, default_per_page: i64) -> Option<PageRequest> {
        PageRequest::from_params(
            self.page.as_deref(),
            self.per_page.as_deref(),
            default_per_page,
        )
    }
}

/// `GET /projetos` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ProjetoListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search_subprograma: Option<String>,
    pub search_nome: Option<String>,
    pub search_ordem_producao: Option<String>,
    pub search_disciplinas: Option<String>,
    pub search_tipos_processamento: Option<String>,
}

/// `GET /atividades` query string.
#[derive(Debug, Default, Deserialize)]
pub struct AtividadeListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub projeto_id: Option<String>,
    pub squad_id: Option<String>,
    pub status: Option<String>,
    pub prioridade: Option<String>,
}

/// Parse an optional id filter, ignoring blank or non-numeric input.
pub fn parse_id_filter(value: Option<&str>) -> Option<DbId> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Keep an optional exact-match filter only when it is non-blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
