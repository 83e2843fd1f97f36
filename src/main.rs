use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use chirpy::config::AppConfig;
use chirpy::database;
use chirpy::handlers::{admin, chirps, health, session, users, webhooks};
use chirpy::middleware::{log_failures, track_hits};
use chirpy::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DB_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(platform = ?config.platform, "starting chirpy");

    let pool = match database::connect(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("invalid database URL: {}", e);
            std::process::exit(1);
        }
    };

    // Best effort: a missing database degrades the service, it does not
    // prevent startup (the health endpoint stays up either way).
    if let Err(e) = database::migrate(&pool).await {
        tracing::warn!("migrations not applied: {}", e);
    }

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(pool, config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("chirpy listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/healthz", get(health::healthz))
        // Users and sessions
        .route("/api/users", post(users::create_user).put(users::update_user))
        .route("/api/login", post(session::login))
        .route("/api/refresh", post(session::refresh))
        .route("/api/revoke", post(session::revoke))
        // Chirps
        .route(
            "/api/chirps",
            get(chirps::get_chirps).post(chirps::create_chirp),
        )
        .route(
            "/api/chirps/:chirp_id",
            get(chirps::get_chirp).delete(chirps::delete_chirp),
        )
        // Payment provider callback
        .route("/webhook", post(webhooks::polka_webhook))
        // Admin surface
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        // Global middleware
        .layer(from_fn(log_failures))
        .layer(from_fn_with_state(state.clone(), track_hits))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
