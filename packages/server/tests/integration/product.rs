use serde_json::json;

use crate::common::{DEFAULT_IMAGE, MEDIA_BASE, TestApp, routes};

fn skus(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["sku"].as_str().unwrap().to_string())
        .collect()
}

mod product_creation {
    use super::*;

    #[tokio::test]
    async fn create_returns_product_with_category_name() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;

        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Trail Runner",
                    "description": "Lightweight trail shoe",
                    "price": 89.99,
                    "stock_quantity": 12,
                    "category_id": category_id,
                    "sku": "TR-001",
                    "weight": 0.45,
                    "dimensions": "30x20x12 cm",
                    "is_featured": true,
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let data = &res.body["data"];
        assert_eq!(data["id"].as_str().unwrap().len(), 32);
        assert_eq!(data["name"], "Trail Runner");
        assert_eq!(data["price"], 89.99);
        assert_eq!(data["stock_quantity"], 12);
        assert_eq!(data["category_id"], category_id.as_str());
        assert_eq!(data["category_name"], "Shoes");
        assert_eq!(data["sku"], "TR-001");
        assert_eq!(data["weight"], 0.45);
        assert_eq!(data["dimensions"], "30x20x12 cm");
        assert_eq!(data["is_featured"], true);
        assert_eq!(data["image"], DEFAULT_IMAGE);
        assert!(data["updated_at"].is_null());
        assert!(data["disabled_at"].is_null());
    }

    #[tokio::test]
    async fn optional_fields_default_when_omitted() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app.get(&routes::product("find", &id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["data"]["weight"].is_null());
        assert!(res.body["data"]["dimensions"].is_null());
        assert_eq!(res.body["data"]["is_featured"], false);
    }

    #[tokio::test]
    async fn invalid_numbers_are_rejected() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;

        let base = json!({
            "name": "Runner",
            "description": "Shoe",
            "price": 10,
            "stock_quantity": 1,
            "category_id": category_id,
            "sku": "RUN-1",
        });

        let mut negative_price = base.clone();
        negative_price["price"] = json!(-1);
        let res = app.post(routes::PRODUCT_CREATE, &negative_price).await;
        assert_eq!(res.status, 400, "{}", res.text);

        let mut negative_stock = base.clone();
        negative_stock["stock_quantity"] = json!(-3);
        let res = app.post(routes::PRODUCT_CREATE, &negative_stock).await;
        assert_eq!(res.status, 400, "{}", res.text);

        let mut fine_price = base.clone();
        fine_price["price"] = json!(1.005);
        let res = app.post(routes::PRODUCT_CREATE, &fine_price).await;
        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_or_deleted_category_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Runner",
                    "description": "Shoe",
                    "price": 10,
                    "stock_quantity": 1,
                    "category_id": "0192f1c8a1b27c3d9e0f112233445566",
                    "sku": "RUN-1",
                }),
            )
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error(), "Category does not exist");

        let category_id = app.create_category("Shoes").await;
        app.delete(&routes::category("delete", &category_id)).await;
        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Runner",
                    "description": "Shoe",
                    "price": 10,
                    "stock_quantity": 1,
                    "category_id": category_id,
                    "sku": "RUN-1",
                }),
            )
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn duplicate_sku_or_name_is_a_conflict() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Walker",
                    "description": "Shoe",
                    "price": 10,
                    "stock_quantity": 1,
                    "category_id": category_id,
                    "sku": "RUN-1",
                }),
            )
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.error(), "Product name or SKU already exists");

        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Runner",
                    "description": "Shoe",
                    "price": 10,
                    "stock_quantity": 1,
                    "category_id": category_id,
                    "sku": "RUN-2",
                }),
            )
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
    }
}

mod product_listing {
    use super::*;

    #[tokio::test]
    async fn list_includes_category_name_and_total() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        app.create_product(&category_id, "Runner", "RUN-1").await;
        app.create_product(&category_id, "Walker", "WLK-1").await;

        let res = app
            .get("/products/list?order_by=sku&order_dir=asc")
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 2);
        assert_eq!(skus(&res.body), vec!["RUN-1", "WLK-1"]);
        assert_eq!(res.body["data"][0]["category_name"], "Shoes");
    }

    #[tokio::test]
    async fn status_filters_on_disabled_marker() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let runner = app.create_product(&category_id, "Runner", "RUN-1").await;
        app.create_product(&category_id, "Walker", "WLK-1").await;
        app.patch_empty(&routes::product("disable", &runner)).await;

        let res = app.get("/products/list?status=active").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(skus(&res.body), vec!["WLK-1"]);

        let res = app.get("/products/list?status=inactive").await;
        assert_eq!(skus(&res.body), vec!["RUN-1"]);

        let res = app.get(routes::PRODUCT_LIST).await;
        assert_eq!(res.body["total"], 2);
    }

    #[tokio::test]
    async fn deleted_products_are_excluded_under_every_filter() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let runner = app.create_product(&category_id, "Runner", "RUN-1").await;
        let walker = app.create_product(&category_id, "Walker", "WLK-1").await;
        app.patch_empty(&routes::product("disable", &runner)).await;
        app.patch_empty(&routes::product("disable", &walker)).await;
        app.delete(&routes::product("delete", &runner)).await;

        let res = app.get("/products/list?status=inactive").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 1);
        assert_eq!(skus(&res.body), vec!["WLK-1"]);

        let res = app.get("/products/list?search=runner").await;
        assert_eq!(res.body["total"], 0);
        assert!(skus(&res.body).is_empty());

        let res = app
            .get("/products/list?search=runner&status=inactive&order_by=sku&order_dir=asc")
            .await;
        assert_eq!(res.body["total"], 0);

        let res = app.get("/products/list?status=active").await;
        assert_eq!(res.body["total"], 0);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get("/products/list?status=archived").await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error(), "Invalid status value");
    }

    #[tokio::test]
    async fn sort_by_price_descending() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        for (name, sku, price) in [("Cheap", "C-1", 5), ("Pricey", "P-1", 500), ("Mid", "M-1", 50)] {
            let res = app
                .post(
                    routes::PRODUCT_CREATE,
                    &json!({
                        "name": name,
                        "description": "Shoe",
                        "price": price,
                        "stock_quantity": 1,
                        "category_id": category_id,
                        "sku": sku,
                    }),
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app.get("/products/list?order_by=price").await;

        assert_eq!(skus(&res.body), vec!["P-1", "M-1", "C-1"]);
    }

    #[tokio::test]
    async fn search_and_bad_order_by() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        app.create_product(&category_id, "Trail Runner", "TR-1").await;
        app.create_product(&category_id, "Walker", "WLK-1").await;

        let res = app.get("/products/list?search=RUNNER").await;
        assert_eq!(skus(&res.body), vec!["TR-1"]);

        let res = app.get("/products/list?order_by=category_id").await;
        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn limit_is_capped() {
        let app = TestApp::spawn().await;

        let res = app.get("/products/list?limit=1000&page=abc").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["limit"], 100);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["total"], 0);
    }
}

mod product_edit {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app
            .patch(
                &routes::product("edit", &id),
                &json!({ "price": 59.5, "stock_quantity": 3 }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.message(), "Product updated successfully");

        let found = app.get(&routes::product("find", &id)).await;
        let data = &found.body["data"];
        assert_eq!(data["price"], 59.5);
        assert_eq!(data["stock_quantity"], 3);
        assert_eq!(data["name"], "Runner");
        assert_eq!(data["sku"], "RUN-1");
        assert!(data["updated_at"].is_string());
    }

    #[tokio::test]
    async fn null_clears_nullable_fields() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;
        app.patch(
            &routes::product("edit", &id),
            &json!({ "weight": 1.25, "dimensions": "10x10x10" }),
        )
        .await;

        let res = app
            .patch(&routes::product("edit", &id), &json!({ "weight": null }))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let found = app.get(&routes::product("find", &id)).await;
        assert!(found.body["data"]["weight"].is_null());
        assert_eq!(found.body["data"]["dimensions"], "10x10x10");
    }

    #[tokio::test]
    async fn unchanged_payload_has_nothing_to_update() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app
            .patch(
                &routes::product("edit", &id),
                &json!({ "name": "Runner", "sku": "RUN-1", "weight": null }),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error(), "No fields to update");
    }

    #[tokio::test]
    async fn moving_to_another_category_updates_category_name() {
        let app = TestApp::spawn().await;
        let shoes = app.create_category("Shoes").await;
        let boots = app.create_category("Boots").await;
        let id = app.create_product(&shoes, "Runner", "RUN-1").await;

        let res = app
            .patch(&routes::product("edit", &id), &json!({ "category_id": boots }))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let found = app.get(&routes::product("find", &id)).await;
        assert_eq!(found.body["data"]["category_name"], "Boots");

        let res = app
            .patch(
                &routes::product("edit", &id),
                &json!({ "category_id": "0192f1c8a1b27c3d9e0f112233445566" }),
            )
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error(), "Category does not exist");
    }

    #[tokio::test]
    async fn sku_collision_is_a_conflict() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        app.create_product(&category_id, "Runner", "RUN-1").await;
        let id = app.create_product(&category_id, "Walker", "WLK-1").await;

        let res = app
            .patch(&routes::product("edit", &id), &json!({ "sku": "RUN-1" }))
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
    }
}

mod product_lifecycle {
    use super::*;

    #[tokio::test]
    async fn toggle_reports_status() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app.patch_empty(&routes::product("disable", &id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "inactive");
        assert_eq!(res.message(), "Product disabled successfully");

        let res = app.patch_empty(&routes::product("disable", &id)).await;
        assert_eq!(res.body["status"], "active");
        assert_eq!(res.message(), "Product enabled successfully");
    }

    #[tokio::test]
    async fn deleted_product_is_gone() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app.delete(&routes::product("delete", &id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.message(), "Product deleted successfully");

        assert_eq!(app.get(&routes::product("find", &id)).await.status, 404);
        assert_eq!(app.delete(&routes::product("delete", &id)).await.status, 404);
        assert_eq!(app.get(routes::PRODUCT_LIST).await.body["total"], 0);

        // Product name and SKU stay reserved by deleted rows.
        let res = app
            .post(
                routes::PRODUCT_CREATE,
                &json!({
                    "name": "Other",
                    "description": "Shoe",
                    "price": 10,
                    "stock_quantity": 1,
                    "category_id": category_id,
                    "sku": "RUN-1",
                }),
            )
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
    }

    #[tokio::test]
    async fn missing_id_is_a_bad_request() {
        let app = TestApp::spawn().await;

        let res = app.delete("/products/delete").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.error(), "ID parameter is required");
    }
}

mod product_image {
    use super::*;

    #[tokio::test]
    async fn upload_uses_product_key() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app
            .upload(
                &routes::product("change-image", &id),
                "image",
                "runner.jpg",
                "image/jpeg",
                vec![0xFF, 0xD8, 0xFF],
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let expected_url = format!("{MEDIA_BASE}/products/{id}.jpg");
        assert_eq!(res.body["url"], expected_url.as_str());
        assert!(app.media_root.join(format!("products/{id}.jpg")).exists());

        let found = app.get(&routes::product("find", &id)).await;
        assert_eq!(found.body["data"]["image"], expected_url.as_str());
    }

    #[tokio::test]
    async fn oversized_image_is_rejected() {
        let app = TestApp::spawn().await;
        let category_id = app.create_category("Shoes").await;
        let id = app.create_product(&category_id, "Runner", "RUN-1").await;

        let res = app
            .upload(
                &routes::product("change-image", &id),
                "image",
                "huge.png",
                "image/png",
                vec![0u8; crate::common::MAX_IMAGE_SIZE + 1],
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert!(res.error().contains("maximum size"));
    }
}
