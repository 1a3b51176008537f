//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Club API",
        version = "0.1.0",
        description = "Members, books and loans of a book club lending library"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Members
        members::list_members,
        members::create_member,
        members::delete_member,
        // Books
        books::list_books,
        books::create_book,
        books::delete_book,
        // Loans
        loans::lend_book,
        loans::list_active_loans,
        loans::return_loan,
    ),
    components(
        schemas(
            crate::models::member::Member,
            crate::models::book::Book,
            crate::models::loan::Loan,
            crate::models::loan::ActiveLoan,
            members::CreateMemberRequest,
            books::CreateBookRequest,
            loans::LendRequest,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "members", description = "Member registry"),
        (name = "books", description = "Book catalog"),
        (name = "loans", description = "Lending workflow")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
