// src/web/routes.rs
use crate::{
    state::AppState,
    web::{agendamento_handlers, kit_handlers, material_handlers, mw_ocultos, problema_handlers, usuario_handlers},
};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

// Fotos de perfil chegam no corpo do PUT /usuarios/{id}
const LIMITE_CORPO: usize = 10 * 1024 * 1024;

pub fn create_router(app_state: AppState, static_dir: &Path) -> Router {
    let usuario_routes = Router::new()
        .route(
            "/",
            get(usuario_handlers::listar_usuarios).post(usuario_handlers::criar_usuario),
        )
        .route(
            "/{id}",
            get(usuario_handlers::obter_usuario)
                .put(usuario_handlers::atualizar_usuario)
                .delete(usuario_handlers::remover_usuario),
        );

    let material_routes = Router::new()
        .route(
            "/",
            get(material_handlers::listar_materiais).post(material_handlers::criar_material),
        )
        .route(
            "/{id}",
            get(material_handlers::obter_material)
                .put(material_handlers::atualizar_material)
                .delete(material_handlers::remover_material),
        );

    let problema_routes = Router::new()
        .route(
            "/",
            get(problema_handlers::listar_problemas).post(problema_handlers::criar_problema),
        )
        .route(
            "/{id}",
            get(problema_handlers::obter_problema)
                .put(problema_handlers::atualizar_problema)
                .delete(problema_handlers::remover_problema),
        );

    let agendamento_routes = Router::new()
        // Filtro opcional: /agendamentos?professor=Marta
        .route(
            "/",
            get(agendamento_handlers::listar_agendamentos).post(agendamento_handlers::criar_agendamento),
        )
        .route(
            "/{id}",
            get(agendamento_handlers::obter_agendamento)
                .put(agendamento_handlers::atualizar_agendamento)
                .delete(agendamento_handlers::remover_agendamento),
        );

    let kit_routes = Router::new()
        .route("/", post(kit_handlers::criar_kit))
        .route("/prof/{professor}", get(kit_handlers::listar_kits_do_professor))
        .route("/kit/{id}", get(kit_handlers::obter_kit))
        .route("/{id}", put(kit_handlers::atualizar_kit).delete(kit_handlers::remover_kit));

    let uploads = ServeDir::new(app_state.fotos.diretorio());
    let front_end = ServeDir::new(static_dir);

    Router::new()
        .nest("/usuarios", usuario_routes)
        .nest("/materiais", material_routes)
        .nest("/problemas", problema_routes)
        .nest("/agendamentos", agendamento_routes)
        .nest("/kits", kit_routes)
        .layer(DefaultBodyLimit::max(LIMITE_CORPO))
        // A raiz abre o login do front-end
        .route_service("/", ServeFile::new(static_dir.join("login.html")))
        .nest_service("/uploads", uploads)
        .fallback_service(front_end)
        .layer(middleware::from_fn(mw_ocultos::recusar_ocultos))
        .with_state(app_state)
}
