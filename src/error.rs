// src/error.rs
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    // Documento guardado ou corpo recebido que não encaixa no esquema
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validação falhou: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Id inválido '{id}': {motivo}")]
    InvalidId { id: String, motivo: String },

    #[error("Transição de status inválida: {de} -> {para}")]
    InvalidTransition { de: String, para: String },

    #[error("Kit '{0}' não existe")]
    KitNotFound(String),

    #[error("{0}")]
    NotFound(String),

    #[error("O documento '{id}' foi alterado por outro pedido (versão esperada {esperada}, atual {atual})")]
    Conflict { id: String, esperada: i64, atual: i64 },

    #[error("Corpo do pedido inválido: {0}")]
    JsonBodyError(#[from] JsonRejection),

    #[error("Formulário multipart inválido: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Erro ao ler campo multipart: {0}")]
    MultipartError(#[from] MultipartError),

    #[error("Erro ao gravar ficheiro: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            // Sem distinção entre erro do cliente e da infraestrutura
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Como converter AppError numa resposta HTTP: sempre { "error": <mensagem> }
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Erro processado: {:?}", self);
        } else {
            tracing::warn!("Pedido recusado ({}): {}", status, self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_code() {
        let error = AppError::NotFound("Agendamento não encontrado".to_string());
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Agendamento não encontrado");
    }

    #[test]
    fn test_conflict_status_code() {
        let error = AppError::Conflict {
            id: "abc".to_string(),
            esperada: 1,
            atual: 2,
        };
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_everything_else_is_server_error() {
        let error = AppError::KitNotFound("k1".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = AppError::InvalidId {
            id: "xyz".to_string(),
            motivo: "formato".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("xyz"));
    }

    #[tokio::test]
    async fn test_response_body_carries_message() {
        let response = AppError::NotFound("Usuário não encontrado".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Usuário não encontrado" }));
    }
}
