use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use productos::api;
use productos::config::{Config, DatabaseBackend, DatabaseConfig, ExportConfig, ServerConfig};
use productos::state::AppState;
use productos::store::{MemoryProductStore, ProductStore, StoreError};
use productos_types::{NewProduct, ProductRecord};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            backend: DatabaseBackend::Memory,
            max_connections: 1,
        },
        export: ExportConfig { max_concurrent: 2 },
    }
}

pub fn product(id: i64, name: &str, price: f64, stock: i32) -> ProductRecord {
    ProductRecord {
        id,
        name: name.to_string(),
        reference: format!("R-{id}"),
        price,
        weight: 0.25,
        category: "Office".to_string(),
        stock,
    }
}

pub fn pen() -> ProductRecord {
    ProductRecord {
        id: 1,
        name: "Pen".to_string(),
        reference: "P-100".to_string(),
        price: 1.50,
        weight: 0.01,
        category: "Office".to_string(),
        stock: 500,
    }
}

pub fn new_product(name: &str, reference: &str, category: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        reference: reference.to_string(),
        price: 2.5,
        weight: 0.1,
        category: category.to_string(),
        stock: 10,
    }
}

pub fn app_with_store(store: Arc<dyn ProductStore>) -> Router {
    api::router(AppState::new(store, &test_config()))
}

pub fn app_with_products(products: Vec<ProductRecord>) -> Router {
    app_with_store(Arc::new(MemoryProductStore::with_products(products)))
}

/// Response parts collected from a one-shot request against the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

/// A store whose every operation fails with a database error.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn list(&self) -> Result<Vec<ProductRecord>, StoreError> {
        Err(unavailable())
    }

    async fn get(&self, _id: i64) -> Result<Option<ProductRecord>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _product: NewProduct) -> Result<ProductRecord, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i64, _product: NewProduct) -> Result<ProductRecord, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn search(&self, _term: &str) -> Result<Option<ProductRecord>, StoreError> {
        Err(unavailable())
    }
}
