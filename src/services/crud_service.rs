// src/services/crud_service.rs
//
// Operações comuns a todas as entidades: listar, obter, criar, atualizar
// sobrepondo campos e remover.
use crate::{
    error::{AppError, AppResult},
    models::{Entidade, Registro},
    services::document_store::{DocumentStore, Filtro},
};
use serde_json::{Map, Value};

fn para_objeto<T: Entidade>(entidade: &T) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(entidade)? {
        Value::Object(map) => Ok(map),
        outro => Err(AppError::JsonError(serde::de::Error::custom(format!(
            "{} deveria ser um objeto, não {}",
            T::COLECAO,
            outro
        )))),
    }
}

pub async fn listar<T: Entidade>(
    store: &DocumentStore,
    filtro: Option<Filtro<'_>>,
) -> AppResult<Vec<Registro<T>>> {
    store
        .buscar(T::COLECAO, filtro)
        .await?
        .into_iter()
        .map(|doc| doc.decodificar())
        .collect()
}

pub async fn obter<T: Entidade>(store: &DocumentStore, id: &str) -> AppResult<Option<Registro<T>>> {
    store
        .buscar_por_id(T::COLECAO, id)
        .await?
        .map(|doc| doc.decodificar())
        .transpose()
}

/// Descodifica o corpo recebido aplicando os valores por omissão do esquema.
pub fn decodificar<T: Entidade>(corpo: Map<String, Value>) -> AppResult<T> {
    let entidade: T = serde_json::from_value(Value::Object(corpo))?;
    entidade.validate()?;
    Ok(entidade)
}

pub async fn inserir<T: Entidade>(store: &DocumentStore, entidade: &T) -> AppResult<Registro<T>> {
    let doc = store.inserir(T::COLECAO, &para_objeto(entidade)?).await?;
    tracing::info!("✅ Criado '{}' em '{}'", doc.id, T::COLECAO);
    doc.decodificar()
}

pub async fn criar<T: Entidade>(store: &DocumentStore, mut corpo: Map<String, Value>) -> AppResult<Registro<T>> {
    // _id e __v são atribuídos pelo armazenamento
    corpo.remove("_id");
    corpo.remove("__v");
    let entidade = decodificar::<T>(corpo)?;
    inserir(store, &entidade).await
}

/// Grava `entidade` se o documento ainda estiver em `versao_esperada`.
pub async fn salvar_versao<T: Entidade>(
    store: &DocumentStore,
    id: &str,
    versao_esperada: i64,
    entidade: &T,
) -> AppResult<Option<Registro<T>>> {
    store
        .substituir_se_versao(T::COLECAO, id, versao_esperada, &para_objeto(entidade)?)
        .await?
        .map(|doc| doc.decodificar())
        .transpose()
}

/// Lê e retira do corpo o `__v` enviado pelo cliente, se houver.
fn retirar_versao(alteracoes: &mut Map<String, Value>) -> AppResult<Option<i64>> {
    alteracoes.remove("_id");
    match alteracoes.remove("__v") {
        None | Some(Value::Null) => Ok(None),
        Some(valor) => Ok(Some(serde_json::from_value::<i64>(valor)?)),
    }
}

/// Sobrepõe as chaves enviadas aos campos guardados. `Ok(None)` quando o id não existe.
pub async fn atualizar_parcial<T: Entidade>(
    store: &DocumentStore,
    id: &str,
    mut alteracoes: Map<String, Value>,
) -> AppResult<Option<Registro<T>>> {
    let Some(atual) = store.buscar_por_id(T::COLECAO, id).await? else {
        tracing::debug!("Atualização ignorada: '{}' não existe em '{}'", id, T::COLECAO);
        return Ok(None);
    };

    let versao_esperada = retirar_versao(&mut alteracoes)?.unwrap_or(atual.versao);
    let anterior: T = serde_json::from_value(Value::Object(atual.corpo.clone()))?;

    let mut corpo = atual.corpo;
    corpo.extend(alteracoes);
    let nova = decodificar::<T>(corpo)?;
    nova.validar_transicao(&anterior)?;

    let registro = salvar_versao(store, id, versao_esperada, &nova).await?;
    if registro.is_some() {
        tracing::info!("✅ Atualizado '{}' em '{}'", id, T::COLECAO);
    }
    Ok(registro)
}

pub async fn remover<T: Entidade>(store: &DocumentStore, id: &str) -> AppResult<()> {
    store.remover_por_id(T::COLECAO, id).await?;
    tracing::info!("🗑️ Removido '{}' de '{}'", id, T::COLECAO);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::models::{
        material::Material,
        problema::{Problema, StatusProblema},
        usuario::Usuario,
    };
    use serde_json::json;

    async fn store() -> DocumentStore {
        DocumentStore::new(create_test_pool().await)
    }

    fn objeto(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("esperado objeto JSON"),
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults_and_get_returns_same_record() {
        let store = store().await;
        let criado = criar::<Usuario>(&store, objeto(json!({ "nome": "Ana", "email": "ana@etec.sp.gov.br" })))
            .await
            .unwrap();
        assert_eq!(criado.dados.nome.as_deref(), Some("Ana"));
        assert_eq!(criado.dados.foto, "");
        assert_eq!(criado.versao, 0);

        let lido = obter::<Usuario>(&store, &criado.id).await.unwrap();
        assert_eq!(lido, Some(criado));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_dropped_for_typed_entities() {
        let store = store().await;
        let criado = criar::<Problema>(&store, objeto(json!({ "descricao": "Pia entupida", "prioridade": "alta" })))
            .await
            .unwrap();
        let doc = store.buscar_por_id("problemas", &criado.id).await.unwrap().unwrap();
        assert!(!doc.corpo.contains_key("prioridade"));
        assert_eq!(doc.corpo["status"], json!("Pendente"));
    }

    #[tokio::test]
    async fn test_material_keeps_arbitrary_fields() {
        let store = store().await;
        let corpo = objeto(json!({ "nome": "Luvas", "tamanhos": ["P", "M"], "estoque": 40 }));
        let criado = criar::<Material>(&store, corpo.clone()).await.unwrap();
        assert_eq!(criado.dados.0, corpo);

        let json = serde_json::to_value(&criado).unwrap();
        assert_eq!(json["estoque"], json!(40));
        assert_eq!(json["_id"], json!(criado.id));
        assert_eq!(json["__v"], json!(0));
    }

    #[tokio::test]
    async fn test_partial_update_overwrites_only_supplied_keys() {
        let store = store().await;
        let criado = criar::<Usuario>(&store, objeto(json!({ "nome": "Ana", "funcao": "professor" })))
            .await
            .unwrap();

        let atualizado = atualizar_parcial::<Usuario>(&store, &criado.id, objeto(json!({ "materia": "Química" })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(atualizado.dados.nome.as_deref(), Some("Ana"));
        assert_eq!(atualizado.dados.funcao.as_deref(), Some("professor"));
        assert_eq!(atualizado.dados.materia.as_deref(), Some("Química"));
        assert_eq!(atualizado.versao, 1);
    }

    #[tokio::test]
    async fn test_partial_update_of_missing_id_is_none() {
        let store = store().await;
        let id = uuid::Uuid::new_v4().to_string();
        let resultado = atualizar_parcial::<Material>(&store, &id, objeto(json!({ "nome": "x" })))
            .await
            .unwrap();
        assert!(resultado.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_checks_status_transition() {
        let store = store().await;
        let criado = criar::<Problema>(&store, objeto(json!({ "descricao": "x", "status": "Resolvido" })))
            .await
            .unwrap();
        assert_eq!(criado.dados.status, StatusProblema::Resolvido);

        let err = atualizar_parcial::<Problema>(&store, &criado.id, objeto(json!({ "status": "Em andamento" })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        let reaberto = atualizar_parcial::<Problema>(&store, &criado.id, objeto(json!({ "status": "Pendente" })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reaberto.dados.status, StatusProblema::Pendente);
    }

    #[tokio::test]
    async fn test_stale_version_token_is_a_conflict() {
        let store = store().await;
        let criado = criar::<Material>(&store, objeto(json!({ "nome": "Pinça" }))).await.unwrap();
        atualizar_parcial::<Material>(&store, &criado.id, objeto(json!({ "nome": "Pinça metálica" })))
            .await
            .unwrap();

        let err = atualizar_parcial::<Material>(&store, &criado.id, objeto(json!({ "nome": "Pinça de madeira", "__v": 0 })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_remove_then_get_is_none() {
        let store = store().await;
        let criado = criar::<Material>(&store, objeto(json!({ "nome": "Pinça" }))).await.unwrap();
        remover::<Material>(&store, &criado.id).await.unwrap();
        assert!(obter::<Material>(&store, &criado.id).await.unwrap().is_none());
    }
}
