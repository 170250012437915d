// src/services/mod.rs
pub mod agendamento_service;
pub mod crud_service;
pub mod document_store;
pub mod photo_storage;
