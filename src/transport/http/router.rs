use crate::domain::model::{Professor, SalaryStats};
use crate::transport::http::handlers::{health, professores, queries};
use crate::transport::http::types::{
    CreateProfessorForm, CreatedResponse, HealthResponse, MsgResponse, UpdateSalaryRequest,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::index_handler,
        health::healthcheck_handler,
        professores::list_professores_handler,
        professores::create_professor_handler,
        professores::delete_professor_handler,
        professores::update_salary_handler,
        queries::search_handler,
        queries::salary_at_least_handler,
        queries::salary_between_handler,
        queries::totals_handler
    ),
    components(schemas(
        Professor,
        SalaryStats,
        CreateProfessorForm,
        CreatedResponse,
        UpdateSalaryRequest,
        MsgResponse,
        HealthResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// Builds the application router.
///
/// `upload_body_limit` caps request bodies at the transport level; the photo
/// size policy itself is enforced by the upload validator.
pub fn create_router(
    app_state: crate::transport::http::types::AppState,
    upload_body_limit: usize,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/professores",
            get(professores::list_professores_handler).post(professores::create_professor_handler),
        )
        .route(
            "/professores/",
            get(professores::list_professores_handler).post(professores::create_professor_handler),
        )
        .route("/professores/total", get(queries::totals_handler))
        .route("/professores/pesq/:palavra", get(queries::search_handler))
        .route("/professores/salario/:inicial", get(queries::salary_at_least_handler))
        .route(
            "/professores/salario/:inicial/:final",
            get(queries::salary_between_handler),
        )
        .route(
            "/professores/:id",
            axum::routing::delete(professores::delete_professor_handler)
                .put(professores::update_salary_handler),
        )
        .layer(DefaultBodyLimit::max(upload_body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
