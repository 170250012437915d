// src/models/kit.rs
use super::{nulo_como_padrao, Entidade};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Item de um kit, copiado do inventário no momento da montagem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_selected: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Kit {
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `nome` is required."))]
    pub nome: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    #[validate(length(min = 1, message = "Path `professor` is required."))]
    pub professor: String,
    #[serde(default, deserialize_with = "nulo_como_padrao")]
    pub items: Vec<KitItem>,
}

impl Entidade for Kit {
    const COLECAO: &'static str = "kits";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_keep_order_and_wire_names() {
        let kit: Kit = serde_json::from_value(json!({
            "nome": "Titulação",
            "professor": "Marta",
            "items": [
                { "id": "m1", "name": "Bureta", "unit": "un", "qtySelected": 2 },
                { "id": "m2", "name": "Fenolftaleína", "unit": "ml", "qtySelected": 5.5 }
            ]
        }))
        .unwrap();
        assert_eq!(kit.items.len(), 2);
        assert_eq!(kit.items[0].name.as_deref(), Some("Bureta"));
        assert_eq!(kit.items[1].qty_selected, Some(5.5));

        let value = serde_json::to_value(&kit).unwrap();
        assert_eq!(value["items"][0]["qtySelected"], json!(2.0));
    }

    #[test]
    fn test_nome_is_required() {
        let kit: Kit = serde_json::from_value(json!({ "professor": "Marta" })).unwrap();
        let errors = kit.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
    }
}
