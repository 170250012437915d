// src/web/kit_handlers.rs
use crate::{
    error::AppResult,
    models::{kit::Kit, Registro},
    services::{
        crud_service,
        document_store::{DocumentStore, Filtro},
    },
};
use crate::web::extract::CorpoJson;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub async fn criar_kit(
    State(store): State<DocumentStore>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Kit>>> {
    tracing::debug!("POST /kits");
    Ok(Json(crud_service::criar(&store, corpo).await?))
}

// GET /kits/prof/{professor}
pub async fn listar_kits_do_professor(
    State(store): State<DocumentStore>,
    Path(professor): Path<String>,
) -> AppResult<Json<Vec<Registro<Kit>>>> {
    tracing::debug!("GET /kits/prof/{}", professor);
    let filtro = Filtro { campo: "professor", valor: &professor };
    Ok(Json(crud_service::listar(&store, Some(filtro)).await?))
}

// GET /kits/kit/{id} — null quando não existe
pub async fn obter_kit(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<Registro<Kit>>>> {
    tracing::debug!("GET /kits/kit/{}", id);
    Ok(Json(crud_service::obter(&store, &id).await?))
}

pub async fn atualizar_kit(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Option<Registro<Kit>>>> {
    tracing::debug!("PUT /kits/{}", id);
    Ok(Json(crud_service::atualizar_parcial(&store, &id, corpo).await?))
}

pub async fn remover_kit(State(store): State<DocumentStore>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    tracing::debug!("DELETE /kits/{}", id);
    crud_service::remover::<Kit>(&store, &id).await?;
    Ok(Json(json!({ "ok": true })))
}
