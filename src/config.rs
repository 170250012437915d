// src/config.rs
use std::{env, path::PathBuf};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://agendamentos_etec.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Configuração lida do ambiente (com `.env` opcional), com valores de recurso.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // MONGO_URI continua aceite para quem ainda tem o .env antigo
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("MONGO_URI"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT inválida '{}': {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        let uploads_dir = lookup("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            database_url,
            port,
            uploads_dir,
            static_dir,
        })
    }
}
