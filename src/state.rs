// src/state.rs
use crate::services::{document_store::DocumentStore, photo_storage::PhotoStorage};

// Criado uma vez no arranque e partilhado (por clone) com todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub fotos: PhotoStorage,
}

// Permite extrair o armazenamento diretamente
impl axum::extract::FromRef<AppState> for DocumentStore {
    fn from_ref(state: &AppState) -> DocumentStore {
        state.store.clone()
    }
}

impl axum::extract::FromRef<AppState> for PhotoStorage {
    fn from_ref(state: &AppState) -> PhotoStorage {
        state.fotos.clone()
    }
}
