// src/web/agendamento_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        agendamento::{Agendamento, AlteracaoAgendamento},
        Registro,
    },
    services::{
        agendamento_service, crud_service,
        document_store::{DocumentStore, Filtro},
    },
};
use crate::web::extract::CorpoJson;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct FiltroProfessor {
    pub professor: Option<String>,
}

// GET /agendamentos?professor=...
pub async fn listar_agendamentos(
    State(store): State<DocumentStore>,
    Query(filtro): Query<FiltroProfessor>,
) -> AppResult<Json<Vec<Registro<Agendamento>>>> {
    tracing::debug!("GET /agendamentos (professor={:?})", filtro.professor);
    // professor vazio conta como ausente
    let filtro = filtro
        .professor
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|valor| Filtro { campo: "professor", valor });
    Ok(Json(crud_service::listar(&store, filtro).await?))
}

pub async fn obter_agendamento(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Registro<Agendamento>>> {
    tracing::debug!("GET /agendamentos/{}", id);
    crud_service::obter(&store, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(agendamento_service::NAO_ENCONTRADO.to_string()))
}

pub async fn criar_agendamento(
    State(store): State<DocumentStore>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Agendamento>>> {
    tracing::debug!("POST /agendamentos");
    Ok(Json(agendamento_service::criar(&store, corpo).await?))
}

pub async fn atualizar_agendamento(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Agendamento>>> {
    tracing::debug!("PUT /agendamentos/{}", id);
    // status desconhecido ou tipo errado: erro do armazenamento (500), não do extrator
    let alteracao: AlteracaoAgendamento = serde_json::from_value(Value::Object(corpo))?;
    Ok(Json(agendamento_service::atualizar(&store, &id, alteracao).await?))
}

pub async fn remover_agendamento(State(store): State<DocumentStore>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    tracing::debug!("DELETE /agendamentos/{}", id);
    crud_service::remover::<Agendamento>(&store, &id).await?;
    Ok(Json(json!({ "ok": true })))
}
