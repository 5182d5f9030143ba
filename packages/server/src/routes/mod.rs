use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{category, product, user};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/users", user_routes())
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(category::create_category))
        .routes(routes!(category::list_categories))
        .routes(routes!(category::find_category))
        .routes(routes!(category::edit_category))
        .routes(routes!(category::delete_category))
        .routes(routes!(category::toggle_category))
        .routes(routes!(category::change_category_image))
}

fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(product::create_product))
        .routes(routes!(product::list_products))
        .routes(routes!(product::find_product))
        .routes(routes!(product::edit_product))
        .routes(routes!(product::delete_product))
        .routes(routes!(product::toggle_product))
        .routes(routes!(product::change_product_image))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(user::create_user))
        .routes(routes!(user::find_user))
}
