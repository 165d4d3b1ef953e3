pub mod export;
pub mod health;
pub mod products;

pub use export::{export_excel, export_pdf};
pub use health::health_check;
pub use products::{
    create_product, delete_product, get_product, list_products, search_product, update_product,
};

use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let product_routes = Router::new()
        .route("/all", get(list_products))
        .route("/post", post(create_product))
        .route("/put/:id", put(update_product))
        .route("/delete/:id", delete(delete_product))
        .route("/id/:id", get(get_product))
        .route("/search/:search", get(search_product))
        .route("/export/pdf", get(export_pdf))
        .route("/export/excel", get(export_excel));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/product", product_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
