//! Member management endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppResult, models::member::Member, AppState};

use super::{ApiPath, MessageResponse, ValidatedJson};

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(required(message = "name and email required"))]
    pub name: Option<String>,
    /// Must not belong to another member
    #[validate(required(message = "name and email required"))]
    pub email: Option<String>,
}

/// List all members, newest first
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "List of members", body = Vec<Member>)
    )
)]
pub async fn list_members(State(state): State<AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list_members().await?;
    Ok(Json(members))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Missing fields or email already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let member = state
        .services
        .members
        .add_member(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Delete a member and their loan records
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.members.delete_member(id).await?;
    Ok(Json(MessageResponse::new("member deleted")))
}
