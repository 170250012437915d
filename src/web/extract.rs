// src/web/extract.rs
use crate::error::{AppError, AppResult};
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

/// Corpo JSON (objeto) cuja rejeição passa por `AppError`, como qualquer outra falha.
#[derive(Debug, Clone, Default)]
pub struct CorpoJson(pub Map<String, Value>);

impl<S> FromRequest<S> for CorpoJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(corpo) = Json::<Map<String, Value>>::from_request(req, state).await?;
        Ok(CorpoJson(corpo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, StatusCode};
    use axum::response::IntoResponse;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method(Method::POST).uri("/problemas");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_object() {
        let CorpoJson(corpo) = CorpoJson::from_request(request(Some("application/json"), r#"{"descricao":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(corpo["descricao"], Value::from("x"));
    }

    #[tokio::test]
    async fn test_rejections_become_server_errors() {
        for (ct, body) in [
            (Some("application/json"), "{not json"),
            (None, r#"{"descricao":"x"}"#),
            (Some("application/json"), "[1]"),
        ] {
            let err = CorpoJson::from_request(request(ct, body), &()).await.unwrap_err();
            assert!(matches!(err, AppError::JsonBodyError(_)));
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
