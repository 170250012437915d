// src/services/agendamento_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        agendamento::{Agendamento, AlteracaoAgendamento},
        kit::Kit,
        Entidade, Registro,
    },
    services::{crud_service, document_store::DocumentStore},
};
use serde_json::{Map, Value};

pub const NAO_ENCONTRADO: &str = "Agendamento não encontrado";

/// `kitId` tem de apontar para um kit existente. A correspondência de
/// `professor` entre kit e agendamento não é verificada.
async fn verificar_kit(store: &DocumentStore, kit_id: Option<&str>) -> AppResult<()> {
    let Some(kit_id) = kit_id else {
        return Ok(());
    };
    let existe = match store.buscar_por_id(Kit::COLECAO, kit_id).await {
        Ok(doc) => doc.is_some(),
        Err(AppError::InvalidId { .. }) => false,
        Err(e) => return Err(e),
    };
    if existe {
        Ok(())
    } else {
        tracing::warn!("Agendamento referencia kit inexistente '{}'", kit_id);
        Err(AppError::KitNotFound(kit_id.to_string()))
    }
}

pub async fn criar(store: &DocumentStore, mut corpo: Map<String, Value>) -> AppResult<Registro<Agendamento>> {
    corpo.remove("_id");
    corpo.remove("__v");
    let novo = crud_service::decodificar::<Agendamento>(corpo)?;
    verificar_kit(store, novo.kit_id.as_deref()).await?;
    tracing::info!(
        "Novo agendamento: {} em {} {} ({})",
        novo.laboratorio, novo.data, novo.hora, novo.professor
    );
    crud_service::inserir(store, &novo).await
}

/// Lê o registo, aplica a alteração campo a campo e grava com verificação de versão.
pub async fn atualizar(
    store: &DocumentStore,
    id: &str,
    alteracao: AlteracaoAgendamento,
) -> AppResult<Registro<Agendamento>> {
    let atual = crud_service::obter::<Agendamento>(store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NAO_ENCONTRADO.to_string()))?;

    let versao_esperada = alteracao.versao.unwrap_or(atual.versao);
    let kit_alterado = alteracao.kit_id.is_some() && alteracao.kit_id != atual.dados.kit_id;

    let novo = atual.dados.mesclar(alteracao);
    novo.validar_transicao(&atual.dados)?;
    validator::Validate::validate(&novo)?;
    if kit_alterado {
        verificar_kit(store, novo.kit_id.as_deref()).await?;
    }

    let registro = crud_service::salvar_versao(store, id, versao_esperada, &novo)
        .await?
        // apagado entre a leitura e a escrita
        .ok_or_else(|| AppError::NotFound(NAO_ENCONTRADO.to_string()))?;
    tracing::info!("✅ Agendamento '{}' atualizado (status {})", id, registro.dados.status);
    Ok(registro)
}
