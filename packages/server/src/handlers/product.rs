use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::id::{IdQuery, RequiredId};
use crate::extractors::json::AppJson;
use crate::models::product::*;
use crate::models::shared::{
    DataResponse, ImageResponse, ListResponse, MessageResponse, StatusMessageResponse,
};
use crate::services::image::{ImageOwner, store_image};
use crate::services::listing::ListParams;
use crate::services::product::{ProductService, SORT_COLUMNS, sort_column};
use crate::state::AppState;

use super::image::read_image;

#[utoipa::path(
    post,
    path = "/create",
    tag = "Products",
    operation_id = "createProduct",
    summary = "Create a product",
    description = "Creates a product in an existing category. Name and SKU are unique across all products.",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = DataResponse<ProductResponse>),
        (status = 400, description = "Validation error or unknown category", body = ErrorBody),
        (status = 409, description = "Product name or SKU already exists", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(sku = %payload.sku))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_product(&payload)?;

    let txn = state.db.begin().await?;
    let (model, category_name) = ProductService::new(&txn)
        .create(payload, &state.config.media.default_image_url)
        .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProductResponse::new(model, category_name),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List products with pagination, search and status filter",
    description = "Returns a page of non-deleted products with their category name. `status=active` keeps enabled products, `status=inactive` keeps disabled ones.",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Page of products", body = ListResponse<ProductResponse>),
        (status = 400, description = "Invalid status value or unknown order_by column", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ListResponse<ProductResponse>>, AppError> {
    let status = ProductStatus::parse(query.status.as_deref())?;
    let params = ListParams::parse(
        query.page.as_deref(),
        query.limit.as_deref(),
        query.search.as_deref(),
        query.order_by.as_deref(),
        query.order_dir.as_deref(),
        sort_column,
        SORT_COLUMNS,
    )?;

    let (items, total) = ProductService::new(&state.db)
        .list(&params, status)
        .await?;

    Ok(Json(ListResponse {
        data: items
            .into_iter()
            .map(|(model, category_name)| ProductResponse::new(model, category_name))
            .collect(),
        total,
        page: params.page,
        limit: params.limit,
    }))
}

#[utoipa::path(
    get,
    path = "/find",
    tag = "Products",
    operation_id = "findProduct",
    summary = "Get a product by id",
    params(IdQuery),
    responses(
        (status = 200, description = "Product details", body = DataResponse<ProductResponse>),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_product(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<DataResponse<ProductResponse>>, AppError> {
    let (model, category_name) = ProductService::new(&state.db).find(&id).await?;
    Ok(Json(DataResponse {
        data: ProductResponse::new(model, category_name),
    }))
}

#[utoipa::path(
    patch,
    path = "/edit",
    tag = "Products",
    operation_id = "editProduct",
    summary = "Update a product",
    description = "Partially updates a product. Only fields that are present and differ from the stored values are written. `weight` and `dimensions` accept `null` to clear them.",
    params(IdQuery),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Validation error or no fields to update", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 409, description = "Product name or SKU already exists", body = ErrorBody),
        (status = 422, description = "Malformed JSON body", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn edit_product(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_update_product(&payload)?;

    let txn = state.db.begin().await?;
    ProductService::new(&txn).edit(&id, payload).await?;
    txn.commit().await?;

    Ok(Json(MessageResponse::new("Product updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Products",
    operation_id = "deleteProduct",
    summary = "Soft-delete a product",
    params(IdQuery),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<MessageResponse>, AppError> {
    ProductService::new(&state.db).delete(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

#[utoipa::path(
    patch,
    path = "/disable",
    tag = "Products",
    operation_id = "toggleProduct",
    summary = "Toggle a product's disabled state",
    description = "Disables an enabled product or re-enables a disabled one, reporting the resulting listing status.",
    params(IdQuery),
    responses(
        (status = 200, description = "New state", body = StatusMessageResponse),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn toggle_product(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
) -> Result<Json<StatusMessageResponse>, AppError> {
    let txn = state.db.begin().await?;
    let outcome = ProductService::new(&txn).toggle_disabled(&id).await?;
    txn.commit().await?;

    tracing::info!(disabled = outcome.is_disabled(), "Toggled product");
    Ok(Json(StatusMessageResponse {
        status: outcome.status(),
        message: outcome.message("Product"),
    }))
}

#[utoipa::path(
    patch,
    path = "/change-image",
    tag = "Products",
    operation_id = "changeProductImage",
    summary = "Replace a product's image",
    description = "Uploads the multipart `image` field to object storage under `products/{id}{.ext}` and stores its public URL.",
    params(IdQuery),
    request_body(content_type = "multipart/form-data", description = "Image file in the `image` field"),
    responses(
        (status = 200, description = "Image replaced", body = ImageResponse),
        (status = 400, description = "Missing id or invalid file", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Upload failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn change_product_image(
    State(state): State<AppState>,
    RequiredId(id): RequiredId,
    multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    let service = ProductService::new(&state.db);
    service.find(&id).await?;

    let upload = read_image(multipart, state.config.media.max_image_size).await?;
    let url = store_image(state.store.as_ref(), ImageOwner::Product, &id, upload).await?;
    service.set_image(&id, &url).await?;

    Ok(Json(ImageResponse {
        message: "Image updated successfully".into(),
        url,
    }))
}
