// src/models/mod.rs
pub mod agendamento;
pub mod kit;
pub mod material;
pub mod problema;
pub mod usuario;

use crate::error::AppResult;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Um tipo de registo guardado numa coleção do armazenamento de documentos.
pub trait Entidade: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    /// Nome da coleção onde os documentos deste tipo vivem.
    const COLECAO: &'static str;

    /// Chamado numa atualização com o estado anterior do registo.
    fn validar_transicao(&self, _anterior: &Self) -> AppResult<()> {
        Ok(())
    }
}

/// Documento como é devolvido ao cliente: os campos da entidade mais `_id` e `__v`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registro<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub dados: T,
    #[serde(rename = "__v")]
    pub versao: i64,
}

/// `null` explícito vale o mesmo que campo ausente: fica o valor por omissão.
pub fn nulo_como_padrao<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
