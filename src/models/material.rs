// src/models/material.rs
use super::Entidade;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Item de inventário. Sem esquema fixo: guarda qualquer objeto JSON tal como veio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material(pub Map<String, Value>);

impl Validate for Material {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        Ok(())
    }
}

impl Entidade for Material {
    const COLECAO: &'static str = "materiais";
}
