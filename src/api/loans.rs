//! Lending endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::loan::{ActiveLoan, Loan, NewLoan},
    AppState,
};

use super::{ApiPath, MessageResponse, ValidatedJson};

/// Lend request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LendRequest {
    #[validate(required(message = "member_id and book_id required"))]
    pub member_id: Option<i64>,
    #[validate(required(message = "member_id and book_id required"))]
    pub book_id: Option<i64>,
}

/// Lend a book to a member
#[utoipa::path(
    post,
    path = "/lend",
    tag = "loans",
    request_body = LendRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Missing fields or book not available", body = crate::error::ErrorResponse),
        (status = 404, description = "Member or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn lend_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LendRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let (Some(member_id), Some(book_id)) = (request.member_id, request.book_id) else {
        return Err(crate::error::AppError::Validation(
            "member_id and book_id required".to_string(),
        ));
    };

    let loan = state.services.loans.lend(NewLoan { member_id, book_id }).await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// List active loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "Unreturned loans, newest first", body = Vec<ActiveLoan>)
    )
)]
pub async fn list_active_loans(State(state): State<AppState>) -> AppResult<Json<Vec<ActiveLoan>>> {
    let loans = state.services.loans.list_active_loans().await?;
    Ok(Json(loans))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    ApiPath(loan_id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.loans.return_loan(loan_id).await?;
    Ok(Json(MessageResponse::new("book returned successfully")))
}
