use axum::{Json, Router, routing::get};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::config::Config;
use crate::errors::ServerError;
use crate::migration::Migrator;
use crate::openapi::api_doc;
use crate::routes;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const DOCS_PATH: &str = "/docs";

/// Opens the database and brings the schema up to date.
///
/// # Errors
///
/// Returns `ServerError::Database` if the connection or a migration fails.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, ServerError> {
    let db = Database::connect(&config.database_url).await?;
    tracing::info!(backend = ?db.get_database_backend(), "Connected to database");
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the full application: todo API, OpenAPI document and docs UI.
pub fn app(db: &DatabaseConnection) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(api_doc())
        .merge(routes::router(db))
        .split_for_parts();

    let spec = api.clone();
    router
        .route(OPENAPI_JSON_PATH, get(move || async move { Json(spec) }))
        .merge(Scalar::with_url(DOCS_PATH, api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Runs the service until ctrl-c, then closes the database.
///
/// # Errors
///
/// Returns a `ServerError` if the database cannot be opened or migrated, the
/// listener cannot bind, or the server fails while running.
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let db = connect(&config).await?;
    let app = app(&db);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "API: http://{addr}/todos");
    tracing::info!(%addr, "Docs: http://{addr}{DOCS_PATH}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
