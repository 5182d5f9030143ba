use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::id::{IdQuery, RequiredId};
use crate::extractors::json::AppJson;
use crate::models::category::*;
use crate::models::shared::{DataResponse, ImageResponse, ListResponse, MessageResponse};
use crate::services::category::{CategoryService, SORT_COLUMNS, sort_column};
use crate::services::image::{ImageOwner, store_image};
use crate::services::listing::ListParams;
use crate::state::AppState;

use super::image::read_image;

#[utoipa::path(
    post,
    path = "/create",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "Creates a category with a generated id and the default image. Names are unique among non-deleted categories.",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = DataResponse<CategoryResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "Category already exists", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_category(&payload)?;

    let model = CategoryService::new(&state.db)
        .create(payload, &state.config.media.default_image_url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CategoryResponse::from(model),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories with pagination and search",
    description = "Returns a page of non-deleted categories. `search` matches name or description case-insensitively.",
    params(CategoryListQuery),
    responses(
        (status = 200, description = "Page of categories", body = ListResponse<CategoryResponse>),
        (status = 400, description = "Unknown order_by column", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ListResponse<CategoryResponse>>, AppError> {
    let params = ListParams::parse(
        query.page.as_deref(),
        query.limit.as_deref(),
        query.search.as_deref(),
        query.order_by.as_deref(),
        query.order_dir.as_deref(),
        sort_column,
        SORT_COLUMNS,
    )?;

    let (items, total) = CategoryService::new(&state.db).list(&params).await?;

    Ok(Json(ListResponse {
        data: items.into_iter().map(CategoryResponse::from).collect(),
        total,
        page: params.page,
        limit: params.limit,
    }))
}

#[utoipa::path(
    get,
    path = "/find",
    tag = "Categories",
    operation_id = "findCategory",
    summary = "Get a category by id",
    params(IdQuery),
    responses(
        (status = 200, description = "Category details", body = DataResponse<CategoryResponse>),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_category(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<DataResponse<CategoryResponse>>, AppError> {
    let model = CategoryService::new(&state.db).find(&id).await?;
    Ok(Json(DataResponse { data: model.into() }))
}

#[utoipa::path(
    patch,
    path = "/edit",
    tag = "Categories",
    operation_id = "editCategory",
    summary = "Update a category",
    description = "Partially updates a category. Only fields that are present and differ from the stored values are written; if none remain the request is rejected.",
    params(IdQuery),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = MessageResponse),
        (status = 400, description = "Validation error or no fields to update", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 409, description = "Category name already exists", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn edit_category(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_update_category(&payload)?;

    let txn = state.db.begin().await?;
    CategoryService::new(&txn).edit(&id, payload).await?;
    txn.commit().await?;

    Ok(Json(MessageResponse::new("Category updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Soft-delete a category",
    description = "Marks the category deleted. Refused while non-deleted products still reference it.",
    params(IdQuery),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 409, description = "Category still has products", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<MessageResponse>, AppError> {
    let txn = state.db.begin().await?;
    CategoryService::new(&txn).delete(&id).await?;
    txn.commit().await?;

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

#[utoipa::path(
    patch,
    path = "/disable",
    tag = "Categories",
    operation_id = "toggleCategory",
    summary = "Toggle a category's disabled state",
    description = "Disables an enabled category or re-enables a disabled one.",
    params(IdQuery),
    responses(
        (status = 200, description = "New state", body = MessageResponse),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn toggle_category(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<MessageResponse>, AppError> {
    let txn = state.db.begin().await?;
    let outcome = CategoryService::new(&txn).toggle_disabled(&id).await?;
    txn.commit().await?;

    tracing::info!(disabled = outcome.is_disabled(), "Toggled category");
    Ok(Json(MessageResponse::new(outcome.message("Category"))))
}

#[utoipa::path(
    patch,
    path = "/change-image",
    tag = "Categories",
    operation_id = "changeCategoryImage",
    summary = "Replace a category's image",
    description = "Uploads the multipart `image` field to object storage under `categories/{id}{.ext}` and stores its public URL.",
    params(IdQuery),
    request_body(content_type = "multipart/form-data", description = "Image file in the `image` field"),
    responses(
        (status = 200, description = "Image replaced", body = ImageResponse),
        (status = 400, description = "Missing id or invalid file", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 500, description = "Upload failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn change_category_image(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
    multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    let service = CategoryService::new(&state.db);
    service.find(&id).await?;

    let upload = read_image(multipart, state.config.media.max_image_size).await?;
    let url = store_image(state.store.as_ref(), ImageOwner::Category, &id, upload).await?;
    service.set_image(&id, &url).await?;

    Ok(Json(ImageResponse {
        message: "Image updated successfully".into(),
        url,
    }))
}
