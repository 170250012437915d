// src/web/mod.rs
pub mod agendamento_handlers;
pub mod extract;
pub mod kit_handlers;
pub mod material_handlers;
pub mod mw_ocultos;
pub mod problema_handlers;
pub mod routes;
pub mod usuario_handlers;
