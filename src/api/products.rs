use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use productos_types::{NewProduct, ProductRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn message(message: &'static str) -> Json<MessageResponse> {
    Json(MessageResponse { message })
}

/// Unwraps the request body and checks field constraints.
fn validated(payload: std::result::Result<Json<NewProduct>, JsonRejection>) -> Result<NewProduct> {
    let Json(product) = payload.map_err(|e| ServiceError::InvalidRequest(e.body_text()))?;
    product
        .validate()
        .map_err(|problems| ServiceError::InvalidRequest(problems.join(", ")))?;
    Ok(product)
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductRecord>>> {
    let products = state.store.list().await?;
    if products.is_empty() {
        return Err(ServiceError::Empty);
    }
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let product = validated(payload)?;
    let saved = state.store.create(product).await?;
    tracing::info!("Product {} saved", saved.id);
    Ok(message("Product saved"))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let product = validated(payload)?;
    state.store.update(id, product).await?;
    Ok(message("Product updated"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.store.delete(id).await?;
    Ok(message("Product deleted"))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductRecord>> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or(ServiceError::ProductNotFound(id))
}

pub async fn search_product(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> Result<Json<ProductRecord>> {
    match state.store.search(&search).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ServiceError::SearchNotFound(search)),
    }
}
