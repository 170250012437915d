// src/web/usuario_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{usuario::Usuario, Registro},
    services::{crud_service, document_store::DocumentStore, photo_storage::PhotoStorage},
    state::AppState,
};
use crate::web::extract::CorpoJson;
use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::{json, Map, Value};

pub const NAO_ENCONTRADO: &str = "Usuário não encontrado";

// GET /usuarios
pub async fn listar_usuarios(State(store): State<DocumentStore>) -> AppResult<Json<Vec<Registro<Usuario>>>> {
    tracing::debug!("GET /usuarios");
    Ok(Json(crud_service::listar(&store, None).await?))
}

// GET /usuarios/{id}
pub async fn obter_usuario(
    State(store): State<DocumentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Registro<Usuario>>> {
    tracing::debug!("GET /usuarios/{}", id);
    crud_service::obter(&store, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NAO_ENCONTRADO.to_string()))
}

// POST /usuarios
pub async fn criar_usuario(
    State(store): State<DocumentStore>,
    CorpoJson(corpo): CorpoJson,
) -> AppResult<Json<Registro<Usuario>>> {
    tracing::debug!("POST /usuarios");
    Ok(Json(crud_service::criar(&store, corpo).await?))
}

fn e_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Campos de texto do formulário mais, se vier, a foto já guardada em `foto`.
async fn ler_formulario(mut multipart: Multipart, fotos: &PhotoStorage) -> AppResult<Map<String, Value>> {
    let mut dados = Map::new();
    while let Some(campo) = multipart.next_field().await? {
        let nome = campo.name().unwrap_or_default().to_string();
        if nome == "foto" {
            let Some(nome_ficheiro) = campo.file_name().map(str::to_string) else {
                // "foto" como texto simples: tratado como qualquer outro campo
                dados.insert(nome, Value::String(campo.text().await?));
                continue;
            };
            let bytes = campo.bytes().await?;
            if nome_ficheiro.is_empty() && bytes.is_empty() {
                continue;
            }
            let caminho = fotos.salvar(&nome_ficheiro, &bytes).await?;
            dados.insert("foto".to_string(), Value::String(caminho));
        } else if !nome.is_empty() {
            dados.insert(nome, Value::String(campo.text().await?));
        }
    }
    Ok(dados)
}

// PUT /usuarios/{id} — JSON ou multipart/form-data com o ficheiro opcional `foto`
pub async fn atualizar_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> AppResult<Json<Option<Registro<Usuario>>>> {
    tracing::debug!("PUT /usuarios/{}", id);

    let dados = if e_multipart(&request) {
        let multipart = Multipart::from_request(request, &state).await?;
        ler_formulario(multipart, &state.fotos).await?
    } else {
        let CorpoJson(corpo) = CorpoJson::from_request(request, &state).await?;
        corpo
    };

    Ok(Json(crud_service::atualizar_parcial(&state.store, &id, dados).await?))
}

// DELETE /usuarios/{id}
pub async fn remover_usuario(State(store): State<DocumentStore>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    tracing::debug!("DELETE /usuarios/{}", id);
    crud_service::remover::<Usuario>(&store, &id).await?;
    Ok(Json(json!({ "ok": true })))
}
