//! Book catalog endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, models::book::Book, AppState};

use super::{ApiPath, MessageResponse, ValidatedJson};

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(required(message = "title and author required"))]
    pub title: Option<String>,
    #[validate(required(message = "title and author required"))]
    pub author: Option<String>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state
        .services
        .catalog
        .add_book(
            request.title.as_deref().unwrap_or_default(),
            request.author.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Delete a book and its loan records
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(id).await?;
    Ok(Json(MessageResponse::new("book deleted")))
}
