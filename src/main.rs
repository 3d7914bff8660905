use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quizforge_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::cors::cors_layer,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool()?;

    // A database that is down at boot must not kill the process; requests
    // surface storage errors until it comes back.
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::warn!("Migrations could not be applied at startup: {}", e);
    }

    let app_state = AppState::new(pool);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/quizzes/generate",
            post(routes::quiz_routes::generate_quiz),
        )
        .route("/api/quizzes", get(routes::quiz_routes::list_quizzes))
        .route(
            "/api/quizzes/:id",
            get(routes::quiz_routes::get_quiz_for_taking),
        )
        .route("/api/quizzes/:id/pdf", get(routes::quiz_routes::get_quiz_pdf))
        .route(
            "/api/quizzes/:id/submit",
            post(routes::quiz_routes::submit_quiz),
        )
        .with_state(app_state)
        .layer(cors_layer(config.allowed_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
