// src/web/problema_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{problema::Problema, Registro},
    services::{crud_service, document_store::DocumentStore},
};
use crate::web::extract::CorpoJson;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub const NAO_ENCONTRADO: &str = "Problema não encontrado";

pub async fn listar_problemas(State(store): State<DocumentStore>) -> AppResult<Json<Vec<Registro<Problema>>>> {
    tracing::debug!("GET /problemas");
    Ok(Json(crud_service::listar(&store, None).await?))
}

pub async fn obter_problema(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Registro<Problema>>> {
    tracing::debug!("GET /problemas/{}", id);
    crud_service::obter(&store, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NAO_ENCONTRADO.to_string()))
}

pub async fn criar_problema(
    State(store): State<DocumentStore>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Problema>>> {
    tracing::debug!("POST /problemas");
    Ok(Json(crud_service::criar(&store, corpo).await?))
}

pub async fn atualizar_problema(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Option<Registro<Problema>>>> {
    tracing::debug!("PUT /problemas/{}", id);
    Ok(Json(crud_service::atualizar_parcial(&store, &id, corpo).await?))
}

pub async fn remover_problema(State(store): State<DocumentStore>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    tracing::debug!("DELETE /problemas/{}", id);
    crud_service::remover::<Problema>(&store, &id).await?;
    Ok(Json(json!({ "ok": true })))
}
