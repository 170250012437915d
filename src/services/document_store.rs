// src/services/document_store.rs
use crate::{
    error::{AppError, AppResult},
    models::{Entidade, Registro},
};
use serde_json::{Map, Value};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Linha da tabela `documentos`, com o corpo ainda em texto JSON.
#[derive(Debug, FromRow)]
struct LinhaDocumento {
    id: String,
    versao: i64,
    corpo: String,
}

/// Documento lido do armazenamento: id, versão e o corpo sem `_id`/`__v`.
#[derive(Debug, Clone, PartialEq)]
pub struct Documento {
    pub id: String,
    pub versao: i64,
    pub corpo: Map<String, Value>,
}

impl Documento {
    fn from_linha(linha: LinhaDocumento) -> AppResult<Self> {
        let corpo = match serde_json::from_str::<Value>(&linha.corpo)? {
            Value::Object(map) => map,
            outro => {
                tracing::warn!("Documento '{}' com corpo não-objeto: {}", linha.id, outro);
                Map::new()
            }
        };
        Ok(Documento {
            id: linha.id,
            versao: linha.versao,
            corpo,
        })
    }

    pub fn decodificar<T: Entidade>(self) -> AppResult<Registro<T>> {
        let dados = serde_json::from_value(Value::Object(self.corpo))?;
        Ok(Registro {
            id: self.id,
            dados,
            versao: self.versao,
        })
    }
}

/// Igualdade simples sobre um campo de topo do documento.
#[derive(Debug, Clone, Copy)]
pub struct Filtro<'a> {
    pub campo: &'a str,
    pub valor: &'a str,
}

/// Armazenamento de documentos sem esquema sobre SQLite.
///
/// Cada coleção é um conjunto de documentos JSON com id opaco (UUID v4) e um
/// contador de versão usado pelas atualizações condicionais.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    db_pool: SqlitePool,
}

fn validar_id(id: &str) -> AppResult<()> {
    Uuid::parse_str(id).map(|_| ()).map_err(|e| AppError::InvalidId {
        id: id.to_string(),
        motivo: e.to_string(),
    })
}

fn corpo_para_texto(corpo: &Map<String, Value>) -> AppResult<String> {
    Ok(serde_json::to_string(corpo)?)
}

impl DocumentStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn inserir(&self, colecao: &str, corpo: &Map<String, Value>) -> AppResult<Documento> {
        let id = Uuid::new_v4().to_string();
        let texto = corpo_para_texto(corpo)?;
        tracing::debug!("Inserindo documento '{}' em '{}'", id, colecao);

        let linha = sqlx::query_as::<_, LinhaDocumento>(
            r#"
            INSERT INTO documentos (colecao, id, versao, corpo)
            VALUES (?1, ?2, 0, ?3)
            RETURNING id, versao, corpo
            "#,
        )
        .bind(colecao)
        .bind(&id)
        .bind(&texto)
        .fetch_one(&self.db_pool)
        .await?;

        Documento::from_linha(linha)
    }

    /// Todos os documentos da coleção, pela ordem de inserção.
    pub async fn buscar(&self, colecao: &str, filtro: Option<Filtro<'_>>) -> AppResult<Vec<Documento>> {
        let linhas = match filtro {
            Some(Filtro { campo, valor }) => {
                tracing::debug!("Buscando em '{}' com {} = {}", colecao, campo, valor);
                sqlx::query_as::<_, LinhaDocumento>(
                    r#"
                    SELECT id, versao, corpo FROM documentos
                    WHERE colecao = ?1 AND json_extract(corpo, ?2) = ?3
                    ORDER BY rowid ASC
                    "#,
                )
                .bind(colecao)
                .bind(format!("$.\"{}\"", campo))
                .bind(valor)
                .fetch_all(&self.db_pool)
                .await?
            }
            None => {
                tracing::debug!("Buscando todos os documentos de '{}'", colecao);
                sqlx::query_as::<_, LinhaDocumento>(
                    "SELECT id, versao, corpo FROM documentos WHERE colecao = ?1 ORDER BY rowid ASC",
                )
                .bind(colecao)
                .fetch_all(&self.db_pool)
                .await?
            }
        };

        linhas.into_iter().map(Documento::from_linha).collect()
    }

    pub async fn buscar_por_id(&self, colecao: &str, id: &str) -> AppResult<Option<Documento>> {
        validar_id(id)?;
        let linha = sqlx::query_as::<_, LinhaDocumento>(
            "SELECT id, versao, corpo FROM documentos WHERE colecao = ?1 AND id = ?2",
        )
        .bind(colecao)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        if linha.is_none() {
            tracing::debug!("Documento '{}' não encontrado em '{}'", id, colecao);
        }
        linha.map(Documento::from_linha).transpose()
    }

    /// Substitui o corpo sem verificar a versão. Quem leu antes e escreve
    /// depois apaga as alterações feitas entretanto.
    pub async fn substituir_por_id(
        &self,
        colecao: &str,
        id: &str,
        corpo: &Map<String, Value>,
    ) -> AppResult<Option<Documento>> {
        validar_id(id)?;
        let texto = corpo_para_texto(corpo)?;
        let linha = sqlx::query_as::<_, LinhaDocumento>(
            r#"
            UPDATE documentos SET corpo = ?1, versao = versao + 1
            WHERE colecao = ?2 AND id = ?3
            RETURNING id, versao, corpo
            "#,
        )
        .bind(&texto)
        .bind(colecao)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        linha.map(Documento::from_linha).transpose()
    }

    /// Substitui o corpo apenas se a versão guardada ainda for `versao_esperada`.
    ///
    /// `Ok(None)` quando o documento não existe; `AppError::Conflict` quando
    /// outro pedido o alterou desde a leitura.
    pub async fn substituir_se_versao(
        &self,
        colecao: &str,
        id: &str,
        versao_esperada: i64,
        corpo: &Map<String, Value>,
    ) -> AppResult<Option<Documento>> {
        validar_id(id)?;
        let texto = corpo_para_texto(corpo)?;
        let linha = sqlx::query_as::<_, LinhaDocumento>(
            r#"
            UPDATE documentos SET corpo = ?1, versao = versao + 1
            WHERE colecao = ?2 AND id = ?3 AND versao = ?4
            RETURNING id, versao, corpo
            "#,
        )
        .bind(&texto)
        .bind(colecao)
        .bind(id)
        .bind(versao_esperada)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(linha) = linha {
            return Documento::from_linha(linha).map(Some);
        }

        let atual: Option<i64> =
            sqlx::query_scalar("SELECT versao FROM documentos WHERE colecao = ?1 AND id = ?2")
                .bind(colecao)
                .bind(id)
                .fetch_optional(&self.db_pool)
                .await?;

        match atual {
            Some(atual) => {
                tracing::warn!(
                    "Conflito de versão em '{}/{}': esperada {}, atual {}",
                    colecao, id, versao_esperada, atual
                );
                Err(AppError::Conflict {
                    id: id.to_string(),
                    esperada: versao_esperada,
                    atual,
                })
            }
            None => Ok(None),
        }
    }

    /// Remove o documento; não distingue se existia ou não.
    pub async fn remover_por_id(&self, colecao: &str, id: &str) -> AppResult<()> {
        validar_id(id)?;
        let rows_affected = sqlx::query("DELETE FROM documentos WHERE colecao = ?1 AND id = ?2")
            .bind(colecao)
            .bind(id)
            .execute(&self.db_pool)
            .await?
            .rows_affected();
        tracing::debug!("Remoção de '{}/{}': {} linha(s)", colecao, id, rows_affected);
        Ok(())
    }
}
