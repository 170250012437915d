// src/models/agendamento.rs
use super::{nulo_como_padrao, Entidade};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Estado de um agendamento de laboratório.
///
/// Pendente -> Aprovado | Recusado | Cancelado; Aprovado -> Concluido | Cancelado.
/// Recusado, Concluido e Cancelado são finais.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusAgendamento {
    #[default]
    Pendente,
    Aprovado,
    Recusado,
    Concluido,
    Cancelado,
}

impl StatusAgendamento {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAgendamento::Pendente => "Pendente",
            StatusAgendamento::Aprovado => "Aprovado",
            StatusAgendamento::Recusado => "Recusado",
            StatusAgendamento::Concluido => "Concluido",
            StatusAgendamento::Cancelado => "Cancelado",
        }
    }

    pub fn pode_passar_para(self, novo: StatusAgendamento) -> bool {
        use StatusAgendamento::*;
        self == novo
            || matches!(
                (self, novo),
                (Pendente, Aprovado)
                    | (Pendente, Recusado)
                    | (Pendente, Cancelado)
                    | (Aprovado, Concluido)
                    | (Aprovado, Cancelado)
            )
    }
}

impl fmt::Display for StatusAgendamento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// data e hora são texto livre, tal como o front-end os envia
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Agendamento {
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `laboratorio` is required."))]
    pub laboratorio: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `data` is required."))]
    pub data: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `hora` is required."))]
    pub hora: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `professor` is required."))]
    pub professor: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    pub materiais: Vec<String>,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    pub status: StatusAgendamento,
    #[serde(default)]
    pub kit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao_tecnico: Option<String>,
}

impl Entidade for Agendamento {
    const COLECAO: &'static str = "agendamentos";

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

/// Corpo de um PUT /agendamentos/{id}. Campos ausentes ou `null` ficam com o valor guardado.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlteracaoAgendamento {
    pub laboratorio: Option<String>,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub professor: Option<String>,
    pub materiais: Option<Vec<String>>,
    pub status: Option<StatusAgendamento>,
    pub observacao_tecnico: Option<String>,
    pub kit_id: Option<String>,
    /// Versão que o cliente leu; quando ausente vale a versão lida no servidor.
    #[serde(rename = "__v")]
    pub versao: Option<i64>,
}

impl Agendamento {
    /// Aplica a alteração sobre o registo atual, campo a campo.
    pub fn mesclar(&self, alteracao: AlteracaoAgendamento) -> Agendamento {
        Agendamento {
            laboratorio: alteracao.laboratorio.unwrap_or_else(|| self.laboratorio.clone()),
            data: alteracao.data.unwrap_or_else(|| self.data.clone()),
            hora: alteracao.hora.unwrap_or_else(|| self.hora.clone()),
            professor: alteracao.professor.unwrap_or_else(|| self.professor.clone()),
            materiais: alteracao.materiais.unwrap_or_else(|| self.materiais.clone()),
            status: alteracao.status.unwrap_or(self.status),
            observacao_tecnico: alteracao.observacao_tecnico.or_else(|| self.observacao_tecnico.clone()),
            kit_id: alteracao.kit_id.or_else(|| self.kit_id.clone()),
        }
    }
}
