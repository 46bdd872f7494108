use std::net::SocketAddr;

use axum::Router;
use db::DBService;
use services::services::{
    activity::ActivityLogService,
    auth::AuthService,
    cache::ResourceCache,
    dashboard::DashboardService,
    resources::ResourceService,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub resources: ResourceService,
    pub activity: ActivityLogService,
    pub dashboard: DashboardService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:crm.db".to_string());
    let token_secret =
        std::env::var("TOKEN_SECRET").unwrap_or_else(|_| "insecure-dev-secret".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);

    let db = DBService::new(&database_url).await?;

    let state = AppState {
        auth: AuthService::new(db.clone(), token_secret),
        resources: ResourceService::new(db.clone(), ResourceCache::new()),
        activity: ActivityLogService::new(db.clone()),
        dashboard: DashboardService::new(db),
    };

    let app = Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
