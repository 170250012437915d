// src/models/problema.rs
use super::{nulo_como_padrao, Entidade};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Estado de um problema reportado ao técnico.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusProblema {
    #[default]
    Pendente,
    #[serde(rename = "Em andamento")]
    EmAndamento,
    Resolvido,
}

impl StatusProblema {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusProblema::Pendente => "Pendente",
            StatusProblema::EmAndamento => "Em andamento",
            StatusProblema::Resolvido => "Resolvido",
        }
    }

    /// Um problema resolvido pode ser reaberto; repetir o estado atual é sempre permitido.
    pub fn pode_passar_para(self, novo: StatusProblema) -> bool {
        use StatusProblema::*;
        self == novo
            || matches!(
                (self, novo),
                (Pendente, EmAndamento)
                    | (Pendente, Resolvido)
                    | (EmAndamento, Resolvido)
                    | (EmAndamento, Pendente)
                    | (Resolvido, Pendente)
            )
    }
}

impl fmt::Display for StatusProblema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Problema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tecnico: Option<String>,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    pub status: StatusProblema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolucao: Option<String>,
}

impl Entidade for Problema {
    const COLECAO: &'static str = "problemas";

    fn validar_transicao(&self, anterior: &Self) -> AppResult<()> {
        if anterior.status.pode_passar_para(self.status) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                de: anterior.status.to_string(),
                para: self.status.to_string(),
            })
        }
    }
}
