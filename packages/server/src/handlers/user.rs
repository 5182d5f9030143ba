use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::id::{IdQuery, RequiredId};
use crate::extractors::json::AppJson;
use crate::models::shared::DataResponse;
use crate::models::user::{CreateUserRequest, UserResponse, validate_create_user};
use crate::services::user::UserService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/create",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    description = "Creates a user. The password is stored only as an Argon2id hash and never returned.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = DataResponse<UserResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "User name or email already exists", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_user(&payload)?;

    let user = UserService::new(&state.db)
        .create(payload, &state.config.media.default_image_url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/find",
    tag = "Users",
    operation_id = "findUser",
    summary = "Get a user by id",
    params(IdQuery),
    responses(
        (status = 200, description = "User details", body = DataResponse<UserResponse>),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_user(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<DataResponse<UserResponse>>, AppError> {
    let user = UserService::new(&state.db).find(&id).await?;
    Ok(Json(DataResponse { data: user.into() }))
}
