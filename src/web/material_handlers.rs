// src/web/material_handlers.rs
use crate::{
    error::AppResult,
    models::{material::Material, Registro},
    services::{crud_service, document_store::DocumentStore},
};
use crate::web::extract::CorpoJson;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub async fn listar_materiais(State(store): State<DocumentStore>) -> AppResult<Json<Vec<Registro<Material>>>> {
    tracing::debug!("GET /materiais");
    Ok(Json(crud_service::listar(&store, None).await?))
}

// Devolve null quando o id não existe
pub async fn obter_material(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<Registro<Material>>>> {
    tracing::debug!("GET /materiais/{}", id);
    Ok(Json(crud_service::obter(&store, &id).await?))
}

pub async fn criar_material(
    State(store): State<DocumentStore>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Material>>> {
    tracing::debug!("POST /materiais");
    Ok(Json(crud_service::criar(&store, corpo).await?))
}

pub async fn atualizar_material(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Option<Registro<Material>>>> {
    tracing::debug!("PUT /materiais/{}", id);
    Ok(Json(crud_service::atualizar_parcial(&store, &id, corpo).await?))
}

pub async fn remover_material(State(store): State<DocumentStore>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    tracing::debug!("DELETE /materiais/{}", id);
    crud_service::remover::<Material>(&store, &id).await?;
    Ok(Json(json!({ "ok": true })))
}
