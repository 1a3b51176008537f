//! API handlers for the book club REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body extractor that also runs `validator` rules.
///
/// Malformed or missing bodies are rejected with the application error body
/// instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path extractor answering with the application error body.
///
/// An id segment that does not parse names no resource, so it is a 404.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(PathRejection::FailedToDeserializePathParams(rejection)) => {
                tracing::debug!(error = %rejection.body_text(), "Unparseable path parameter");
                Err(AppError::NotFound("not found".to_string()))
            }
            Err(rejection) => Err(AppError::Internal(rejection.body_text())),
        }
    }
}

/// Acknowledgement body for deletes and returns
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.server.static_dir.clone();

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route("/members/:id", delete(members::delete_member))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", delete(books::delete_book))
        // Lending
        .route("/lend", post(loans::lend_book))
        .route("/loans", get(loans::list_active_loans))
        .route("/loans/:id/return", post(loans::return_loan))
        .with_state(state);

    let mut app = Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router());

    // Browser frontend
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir, "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CompressionLayer::new()),
    )
}
