// src/models/usuario.rs
use super::{nulo_como_padrao, Entidade};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Nenhum campo é obrigatório; `foto` guarda o caminho devolvido pelo PhotoStorage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Usuario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funcao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materia: Option<String>,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    pub foto: String,
}

impl Entidade for Usuario {
    const COLECAO: &'static str = "usuarios";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_foto_reads_as_empty() {
        let usuario: Usuario = serde_json::from_value(json!({ "nome": "Ana", "foto": null })).unwrap();
        assert_eq!(usuario.foto, "");
        assert_eq!(usuario.nome.as_deref(), Some("Ana"));
    }
}
