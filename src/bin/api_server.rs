// src/bin/api_server.rs

use professores_api::infra::{config, telemetry};
use professores_api::transport;
use professores_api::{PgRecordStore, PhotoStore, ProfessorService, UploadValidator};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    // --- Record Store ---
    let database_url = config::database_url()?;
    let max_connections = config::db_max_connections()?;
    tracing::info!(max_connections, "connecting to Postgres");
    let records = PgRecordStore::connect(&database_url, max_connections).await?;
    tracing::info!("record store ready (table `professores`)");

    // --- Photo Store ---
    let photos = PhotoStore::open(config::photo_dir()).await?;
    tracing::info!(dir = %photos.root().display(), "photo store ready");

    let service = ProfessorService::new(Arc::new(records), photos, UploadValidator::default());
    let app_state = transport::http::AppState::new(service);

    // --- API Server ---
    let app = transport::http::create_router(app_state, config::upload_body_limit()?).merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
    );

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("API server listening on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
