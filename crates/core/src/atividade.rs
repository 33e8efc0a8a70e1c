//! Prioridade and status values for activities, with validation helpers
//! used by both the DB and API layers.

pub const PRIORIDADE_BAIXA: &str = "baixa";
pub const PRIORIDADE_MEDIA: &str = "media";
pub const PRIORIDADE_ALTA: &str = "alta";

/// All valid prioridade values, lowest first.
pub const VALID_PRIORIDADES: &[&str] = &[PRIORIDADE_BAIXA, PRIORIDADE_MEDIA, PRIORIDADE_ALTA];

/// Prioridade applied when a create request omits it.
pub const DEFAULT_PRIORIDADE: &str = PRIORIDADE_MEDIA;

pub const STATUS_PENDENTE: &str = "pendente";
pub const STATUS_EM_ANDAMENTO: &str = "em_andamento";
pub const STATUS_CONCLUIDA: &str = "concluida";

/// All valid status values, in workflow order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDENTE, STATUS_EM_ANDAMENTO, STATUS_CONCLUIDA];

/// Status applied when a create request omits it.
pub const DEFAULT_STATUS: &str = STATUS_PENDENTE;

/// Validate that a prioridade string is one of the accepted values.
pub fn validate_prioridade(prioridade: &str) -> Result<(), String> {
    if VALID_PRIORIDADES.contains(&prioridade) {
        Ok(())
    } else {
        Err(format!(
            "Prioridade inválida. Use: {}",
            join_choices(VALID_PRIORIDADES)
        ))
    }
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Status inválido. Use: {}",
            join_choices(VALID_STATUSES)
        ))
    }
}

/// Render `["a", "b", "c"]` as `"a, b ou c"`.
fn join_choices(values: &[&str]) -> String {
    match values.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} ou {last}", rest.join(", ")),
        Some((last, _)) => (*last).to_string(),
        None => String::new(),
    }
}
