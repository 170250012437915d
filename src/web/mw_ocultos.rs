// src/web/mw_ocultos.rs
use crate::error::AppError;
use axum::{extract::Request, middleware::Next, response::Response};

// Segmentos começados por "." (".env", ".git", "..") nunca saem dos diretórios servidos.
// O ServeDir já descodificou %2e quando chega a ver o caminho, por isso a verificação é feita aqui.
fn caminho_oculto(caminho: &str) -> bool {
    caminho.split('/').any(|segmento| {
        segmento.starts_with('.') || segmento.get(..3).is_some_and(|inicio| inicio.eq_ignore_ascii_case("%2e"))
    })
}

pub async fn recusar_ocultos(request: Request, next: Next) -> Result<Response, AppError> {
    let caminho = request.uri().path();
    if caminho_oculto(caminho) {
        tracing::warn!("Pedido a caminho oculto recusado: {}", caminho);
        return Err(AppError::NotFound("Não encontrado".to_string()));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_segments() {
        assert!(caminho_oculto("/.env"));
        assert!(caminho_oculto("/css/.segredo"));
        assert!(caminho_oculto("/%2Eenv"));
        assert!(caminho_oculto("/../agendamentos_etec.db"));
        assert!(!caminho_oculto("/"));
        assert!(!caminho_oculto("/login.html"));
        assert!(!caminho_oculto("/uploads/1700000000000-42.png"));
    }
}
