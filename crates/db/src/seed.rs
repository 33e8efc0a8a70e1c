//! Sample squads, projetos and atividades for a fresh install.
//!
//! [`populate`] is idempotent: squads and projetos are matched by name and
//! atividades by (projeto, squad, titulo), so re-running it only fills in
//! what is missing.

use std::collections::HashMap;

use atividades_core::atividade::{PRIORIDADE_ALTA, STATUS_CONCLUIDA};
use atividades_core::types::DbId;
use chrono::{Days, NaiveDate};
use sqlx::PgConnection;

use crate::models::atividade::CreateAtividade;
use crate::models::projeto::CreateProjeto;
use crate::models::squad::CreateSquad;
use crate::repositories::{AtividadeRepo, ProjetoRepo, SquadRepo};

/// Days between the seeding date and the `prazo` of seeded atividades.
pub const PRAZO_OFFSET_DAYS: u64 = 15;

/// `(nome, descricao)` of every seeded squad.
pub const SQUADS: &[(&str, &str)] = &[
    ("Auditoria", "Squad de auditoria"),
    ("Recodificação", "Squad de Recodificação"),
    ("Processamento", "Squad de Processamento"),
    ("Categorização", "Squad de Categorização"),
    ("Medidas", "Squad de Medidas"),
    ("Cálculo", "Squad de Cálculo"),
    ("Validação", "Squad de Validação"),
    ("Recursos", "Squad de Recursos"),
];

/// A seeded projeto. Dates are `(year, month, day)`.
pub struct SeedProjeto {
    pub subprograma: &'static str,
    pub nome: &'static str,
    pub ordem_producao: &'static str,
    pub data_aplicacao: (i32, u32, u32),
    pub data_termino: (i32, u32, u32),
    pub etapas: &'static str,
    pub disciplinas: &'static str,
    pub tipos_processamento: &'static str,
    pub observacao: &'static str,
}

/// Seeded projetos. Each is associated with every seeded squad.
pub const PROJETOS: &[SeedProjeto] = &[
    SeedProjeto {
        subprograma: "2026",
        nome: "MG BELO HORIZONTE - 3ª AV.SOMATIVA 2025 (SIMULADO)",
        ordem_producao: "OP10",
        data_aplicacao: (2025, 10, 20),
        data_termino: (2025, 10, 24),
        etapas: "2º ano EF",
        disciplinas: "Escrita e Matemática",
        tipos_processamento: "Transcrição",
        observacao: "",
    },
    SeedProjeto {
        subprograma: "2075",
        nome: "CE CEARÁ - AV. SOMATIVA EM 2025 (SPAECE EM)",
        ordem_producao: "OP10",
        data_aplicacao: (2025, 10, 22),
        data_termino: (2025, 10, 23),
        etapas: "2ª série EM, 3ª série EM e EJA EM",
        disciplinas: "Língua Portuguesa/Matemática",
        tipos_processamento: "Destaque",
        observacao: "",
    },
    SeedProjeto {
        subprograma: "2132",
        nome: "PI PIAUÍ - AV. SOMATIVA 2025 EF EM (SAEPI)",
        ordem_producao: "OP10",
        data_aplicacao: (2025, 10, 6),
        data_termino: (2025, 10, 17),
        etapas: "5º ano EF, 6º ano EF, 7º ano EF, 8º ano EF, 9º ano EF, 1ª série EM, \
                 2ª série EM e 3ª série EM",
        disciplinas: "Língua Portuguesa/Matemática",
        tipos_processamento: "Destaque",
        observacao: "",
    },
    SeedProjeto {
        subprograma: "2085",
        nome: "MT MATO GROSSO - AV.SOMATIVA 2025 (AVALIAMT)",
        ordem_producao: "OP10",
        data_aplicacao: (2025, 10, 6),
        data_termino: (2025, 10, 17),
        etapas: "3º ano EF, 4º ano EF, 5º ano EF, 6º ano EF, 7º ano EF, 8º ano EF, 9º ano EF, \
                 1ª série EM, 2ª série EM, 3ª série EM e 4ª série EM",
        disciplinas: "Língua Portuguesa/Matemática",
        tipos_processamento: "Destaque e Transcrição",
        observacao: "",
    },
    SeedProjeto {
        subprograma: "2087",
        nome: "MG BELO HORIZONTE - 5a AV.FORMATIVA 2025 (NOVEMBRO)",
        ordem_producao: "OP10",
        data_aplicacao: (2025, 10, 20),
        data_termino: (2025, 10, 24),
        etapas: "1º ano EF, 3º ano EF, 4º ano EF, EJA EPA, 6º ano EF, 7º ano EF e 8º ano EF",
        disciplinas: "Língua Portuguesa/Matemática, Escrita, Produção Textual e Matemática",
        tipos_processamento: "Destaque",
        observacao: "Serão processados apenas Escrita e Produção Textual. \
                     As Objetivas são de tecnologia 5.",
    },
    SeedProjeto {
        subprograma: "2070",
        nome: "GO GOIÁS - AV. SOMATIVA EF EM 2025 (SAEGO)",
        ordem_producao: "OP09",
        data_aplicacao: (2025, 10, 1),
        data_termino: (2025, 10, 1),
        etapas: "9º ano EF e 3ª série EM",
        disciplinas: "Língua Portuguesa/Matemática",
        tipos_processamento: "Destaque",
        observacao: "",
    },
];

/// Atividade titulos of the first seeded projeto, grouped by squad nome.
pub const ATIVIDADES: &[(&str, &[&str])] = &[
    ("Auditoria", &["Destaque", "Transcrição"]),
    (
        "Recodificação",
        &[
            "CR Reserva",
            "CR Anulado",
            "CR Duplicado",
            "CR Genérico",
            "Sujeito C1",
            "Sujeito C2",
            "Público Alvo",
        ],
    ),
    (
        "Processamento",
        &[
            "Frop Pac",
            "Frop Dig",
            "Digitalização",
            "Decodificação",
            "Verificação",
            "Recuperação",
            "Recuperação Extra",
            "Certificação",
            "Correção",
            "Medida",
        ],
    ),
    (
        "Categorização",
        &[
            "T1",
            "T2",
            "T3",
            "T4 Sujeito",
            "T4 Dedução",
            "T4 Recuperação",
            "T5 Participação",
        ],
    ),
    ("Medidas", &["ADC", "NAP", "MCA"]),
    ("Cálculo", &["Previsto", "Jira", "Participação", "Valor"]),
    ("Validação", &["Plano"]),
    ("Recursos", &["Monitoramento"]),
];

/// Rows inserted by one [`populate`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub squads: usize,
    pub projetos: usize,
    pub atividades: usize,
}

/// Total number of seeded atividades.
pub fn atividade_count() -> usize {
    ATIVIDADES.iter().map(|(_, titulos)| titulos.len()).sum()
}

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Insert whatever sample rows are missing.
///
/// All statements run on `conn`; pass an open transaction so a failed run
/// leaves nothing behind. `today` anchors the atividade `prazo`.
pub async fn populate(conn: &mut PgConnection, today: NaiveDate) -> Result<SeedSummary, sqlx::Error> {
    let mut summary = SeedSummary::default();

    let mut squad_ids: HashMap<&str, DbId> = HashMap::with_capacity(SQUADS.len());
    for &(nome, descricao) in SQUADS {
        let id = match SquadRepo::find_by_nome(&mut *conn, nome).await? {
            Some(existing) => existing.id,
            None => {
                let input = CreateSquad {
                    nome: nome.to_string(),
                    descricao: descricao.to_string(),
                };
                let created = SquadRepo::create(&mut *conn, &input).await?;
                summary.squads += 1;
                created.id
            }
        };
        squad_ids.insert(nome, id);
    }
    let all_squads: Vec<DbId> = SQUADS.iter().map(|(nome, _)| squad_ids[nome]).collect();

    let mut projeto_ids = Vec::with_capacity(PROJETOS.len());
    for seed in PROJETOS {
        let id = match ProjetoRepo::find_by_nome(&mut *conn, seed.nome).await? {
            Some(existing) => existing.id,
            None => {
                let input = CreateProjeto {
                    subprograma: seed.subprograma.to_string(),
                    nome: seed.nome.to_string(),
                    ordem_producao: seed.ordem_producao.to_string(),
                    data_aplicacao: date(seed.data_aplicacao),
                    data_termino: date(seed.data_termino),
                    etapas: seed.etapas.to_string(),
                    disciplinas: seed.disciplinas.to_string(),
                    tipos_processamento: seed.tipos_processamento.to_string(),
                    observacao: seed.observacao.to_string(),
                    squad_ids: all_squads.clone(),
                };
                let created = ProjetoRepo::create(&mut *conn, &input).await?;
                summary.projetos += 1;
                created.id
            }
        };
        projeto_ids.push(id);
    }

    let Some(&projeto_id) = projeto_ids.first() else {
        return Ok(summary);
    };
    let prazo = today.checked_add_days(Days::new(PRAZO_OFFSET_DAYS));

    for &(squad_nome, titulos) in ATIVIDADES {
        let squad_id = squad_ids[squad_nome];
        for &titulo in titulos {
            if AtividadeRepo::exists_with_titulo(&mut *conn, projeto_id, squad_id, titulo).await? {
                continue;
            }
            let input = CreateAtividade {
                titulo: titulo.to_string(),
                descricao: String::new(),
                prazo,
                prioridade: PRIORIDADE_ALTA.to_string(),
                status: STATUS_CONCLUIDA.to_string(),
                projeto_id,
                squad_id,
            };
            AtividadeRepo::create(&mut *conn, &input).await?;
            summary.atividades += 1;
        }
    }

    tracing::debug!(
        squads = summary.squads,
        projetos = summary.projetos,
        atividades = summary.atividades,
        "Seed rows inserted"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dates_are_valid() {
        for p in PROJETOS {
            assert!(date(p.data_aplicacao).is_some(), "{}", p.nome);
            assert!(date(p.data_termino).is_some(), "{}", p.nome);
        }
    }

    #[test]
    fn atividades_reference_seeded_squads() {
        for (squad, _) in ATIVIDADES {
            assert!(
                SQUADS.iter().any(|(nome, _)| nome == squad),
                "{squad} is not a seeded squad"
            );
        }
    }

    #[test]
    fn atividade_count_sums_every_group() {
        assert_eq!(atividade_count(), 35);
    }
}
