//! Product route handlers.
//!
//! Reads are public. Writes require an admin session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use sea_apd_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::product::Product;
use crate::models::requests::ProductRequest;
use crate::response::{ApiJson, BaseResponse};
use crate::state::AppState;

/// Unparseable ids cannot name a product.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("product {raw}")))
}

/// `GET /api/products`
pub async fn index(State(state): State<AppState>) -> Result<BaseResponse<Vec<Product>>> {
    let products = state.products().list_products().await?;
    Ok(BaseResponse::ok(products))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BaseResponse<Product>> {
    let product = state.products().get_product(parse_product_id(&id)?).await?;
    Ok(BaseResponse::ok(product))
}

/// `POST /api/products`
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<BaseResponse<Product>> {
    let product = state.products().create_product(request).await?;
    tracing::debug!(admin_id = %admin.id, product_id = %product.id, "admin created product");
    Ok(BaseResponse::created("Product created successfully", product))
}

/// `PUT /api/products/{id}`
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<BaseResponse<Product>> {
    let product = state
        .products()
        .update_product(parse_product_id(&id)?, request)
        .await?;
    Ok(BaseResponse::ok(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BaseResponse> {
    state
        .products()
        .delete_product(parse_product_id(&id)?)
        .await?;
    Ok(BaseResponse::message(StatusCode::OK, "Product deleted successfully"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Method;
    use chrono::Utc;
    use serde_json::json;

    use sea_apd_core::UserRole;

    use super::*;
    use crate::db::RepositoryError;
    use crate::models::product::ProductFields;
    use crate::routes::test_support::{Mocks, expect_login, login, request, send, user};

    fn product(id: ProductId, fields: &ProductFields) -> Product {
        Product {
            id,
            name: fields.name.clone(),
            description: fields.description.clone(),
            price: fields.price,
            image: fields.image.clone(),
            stock: fields.stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Batik Shirt",
            "description": "Hand-drawn",
            "price": 250_000,
            "image": "https://cdn.example/batik.png",
            "stock": 12
        })
    }

    #[tokio::test]
    async fn test_list_and_show_are_public() {
        let existing = product(
            ProductId::generate(),
            &ProductFields {
                name: "Kopi".to_string(),
                price: 30_000,
                stock: 5,
                ..ProductFields::default()
            },
        );

        let mut mocks = Mocks::default();
        let listed = existing.clone();
        mocks
            .products
            .expect_list()
            .returning(move || Ok(vec![listed.clone()]));
        let found = existing.clone();
        mocks
            .products
            .expect_get_by_id()
            .returning(move |id| Ok((id == found.id).then(|| found.clone())));
        let app = mocks.into_app();

        let (status, _, body) = send(&app, request(Method::GET, "/api/products", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let uri = format!("/api/products/{}", existing.id);
        let (status, _, body) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Kopi");

        let uri = format!("/api/products/{}", ProductId::generate());
        let (status, _, body) = send(&app, request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_malformed_product_id_is_not_found() {
        let app = Mocks::default().into_app();
        let (status, _, _) =
            send(&app, request(Method::GET, "/api/products/not-a-uuid", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let customer = user(UserRole::Customer, "rina@example.com");
        let mut mocks = Mocks::default();
        expect_login(&mut mocks.users, &customer, "correct-horse");
        mocks.products.expect_create().never();
        let app = mocks.into_app();

        let (status, _, _) = send(
            &app,
            request(Method::POST, "/api/products", Some(body()), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let cookie = login(&app, "rina@example.com", "correct-horse").await;
        let (status, _, body) = send(
            &app,
            request(Method::POST, "/api/products", Some(body()), Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 403);
    }

    #[tokio::test]
    async fn test_admin_manages_products() {
        let admin = user(UserRole::Admin, "ops@example.com");
        let mut mocks = Mocks::default();
        expect_login(&mut mocks.users, &admin, "long-enough-secret");
        mocks
            .products
            .expect_create()
            .times(1)
            .returning(|f| Ok(product(ProductId::generate(), &f)));
        mocks
            .products
            .expect_update()
            .times(1)
            .returning(|id, f| Ok(product(id, &f)));
        mocks
            .products
            .expect_soft_delete()
            .times(1)
            .returning(|_| Ok(()));
        let app = mocks.into_app();

        let cookie = login(&app, "ops@example.com", "long-enough-secret").await;

        let (status, _, created) = send(
            &app,
            request(Method::POST, "/api/products", Some(body()), Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut changed = body();
        changed["stock"] = json!(3);
        let (status, _, updated) = send(
            &app,
            request(
                Method::PUT,
                &format!("/api/products/{id}"),
                Some(changed),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["stock"], 3);

        let (status, _, _) = send(
            &app,
            request(
                Method::DELETE,
                &format!("/api/products/{id}"),
                None,
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_product_and_missing_delete() {
        let admin = user(UserRole::Admin, "ops@example.com");
        let mut mocks = Mocks::default();
        expect_login(&mut mocks.users, &admin, "long-enough-secret");
        mocks.products.expect_create().never();
        mocks
            .products
            .expect_soft_delete()
            .returning(|_| Err(RepositoryError::NotFound));
        let app = mocks.into_app();

        let cookie = login(&app, "ops@example.com", "long-enough-secret").await;

        let mut negative = body();
        negative["price"] = json!(-5);
        let (status, _, _) = send(
            &app,
            request(Method::POST, "/api/products", Some(negative), Some(&cookie)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &app,
            request(
                Method::DELETE,
                &format!("/api/products/{}", ProductId::generate()),
                None,
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
