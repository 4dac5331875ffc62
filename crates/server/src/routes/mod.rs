//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /api/auth/register       - Create an account, returns a token
//! POST /api/auth/login          - Login, returns a token
//! GET  /api/auth/me             - Current account (requires auth)
//!
//! # Catalog (public reads, admin writes)
//! GET    /api/products          - Product listing
//! GET    /api/products/{id}     - Product detail
//! POST   /api/products          - Create product (admin)
//! PUT    /api/products/{id}     - Patch product (admin)
//! DELETE /api/products/{id}     - Delete product (admin)
//! GET    /api/categories        - Category listing
//! POST   /api/categories        - Create category (admin)
//! PUT    /api/categories/{id}   - Rename category (admin)
//! DELETE /api/categories/{id}   - Delete category (admin)
//!
//! # Storefront content
//! GET    /api/ads               - Active ads
//! POST   /api/ads               - Create ad (admin)
//! PUT    /api/ads/{id}          - Patch ad (admin)
//! DELETE /api/ads/{id}          - Delete ad (admin)
//! GET    /api/quotes            - Quote listing
//! POST   /api/quotes            - Create quote (admin)
//! PUT    /api/quotes/{id}       - Replace quote (admin)
//! DELETE /api/quotes/{id}       - Delete quote (admin)
//!
//! # Orders (requires auth)
//! POST /api/orders              - Place an order (201)
//! POST /api/orders/preview      - Taxed cart quote, nothing persisted
//! GET  /api/orders/me           - Caller's orders with items
//! GET  /api/orders/{id}/invoice - PDF invoice (owner or admin)
//!
//! # Admin
//! GET  /api/admin/orders        - All orders with owner contact
//! GET  /api/admin/ads           - All ads including inactive
//! GET  /api/admin/analytics     - Sales analytics
//! POST /api/upload              - Image upload (multipart, 5 MB cap)
//! ```

pub mod admin;
pub mod ads;
pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod quotes;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Multipart uploads are capped at 5 MB.
const UPLOAD_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Create the full `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(catalog_routes())
        .merge(content_routes())
        .merge(order_routes())
        .merge(admin_routes())
}

/// Create the auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Create the catalog routes router.
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::rename).delete(categories::delete),
        )
}

/// Create the storefront content routes router.
fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/ads", get(ads::list_active).post(ads::create))
        .route("/ads/{id}", put(ads::update).delete(ads::delete))
        .route("/quotes", get(quotes::list).post(quotes::create))
        .route("/quotes/{id}", put(quotes::update).delete(quotes::delete))
}

/// Create the order routes router.
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::place))
        .route("/orders/preview", post(orders::preview))
        .route("/orders/me", get(orders::mine))
        .route("/orders/{id}/invoice", get(orders::invoice))
}

/// Create the admin routes router.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(admin::orders))
        .route("/admin/ads", get(ads::list_all))
        .route("/admin/analytics", get(admin::analytics))
        .route(
            "/upload",
            post(uploads::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
