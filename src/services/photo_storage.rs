// src/services/photo_storage.rs
use crate::error::AppResult;
use chrono::Utc;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Prefixo público com que os ficheiros guardados são servidos.
pub const PREFIXO_PUBLICO: &str = "/uploads";

/// Fotos de perfil guardadas num diretório fixo. Ficheiros antigos nunca são apagados.
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    diretorio: PathBuf,
}

/// `<millis>-<aleatório>` seguido da extensão do nome original (com o ponto).
pub fn gerar_nome(nome_original: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let sufixo: u32 = rand::rng().random_range(0..=1_000_000_000);
    let extensao = Path::new(nome_original)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    format!("{}-{}{}", millis, sufixo, extensao)
}

impl PhotoStorage {
    pub async fn new(diretorio: impl Into<PathBuf>) -> AppResult<Self> {
        let diretorio = diretorio.into();
        tokio::fs::create_dir_all(&diretorio).await?;
        tracing::info!("📁 Fotos guardadas em {}", diretorio.display());
        Ok(Self { diretorio })
    }

    pub fn diretorio(&self) -> &Path {
        &self.diretorio
    }

    /// Grava os bytes com um nome novo e devolve o caminho público (`/uploads/<nome>`).
    pub async fn salvar(&self, nome_original: &str, bytes: &[u8]) -> AppResult<String> {
        loop {
            let nome = gerar_nome(nome_original);
            let caminho = self.diretorio.join(&nome);
            // create_new: nunca sobrescreve uma foto já guardada
            let ficheiro = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&caminho)
                .await;

            match ficheiro {
                Ok(mut ficheiro) => {
                    ficheiro.write_all(bytes).await?;
                    ficheiro.flush().await?;
                    tracing::info!("📷 Foto '{}' guardada como '{}' ({} bytes)", nome_original, nome, bytes.len());
                    return Ok(format!("{}/{}", PREFIXO_PUBLICO, nome));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("Nome '{}' já existe, gerando outro", nome);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
