use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use todos::migration::Migrator;
use todos::{CRUDResource, Todo};
use tower::ServiceExt;

// Helper function to get database URL from environment or default to SQLite
fn get_test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

/// Fresh, migrated and empty database.
///
/// With `TEST_DATABASE_URL` pointing at a shared server the table is cleared
/// instead of recreated, which is why the tests are `#[serial]`.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(get_test_database_url()).await?;
    Migrator::up(&db, None).await?;
    Todo::delete_all(&db).await?;
    Ok(db)
}

#[allow(dead_code)]
pub fn setup_test_app(db: &DatabaseConnection) -> Router {
    todos::app(db)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request and returns the status with the raw body.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[allow(dead_code)]
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Creates a todo through the API and returns the stored record.
#[allow(dead_code)]
pub async fn post_todo(app: &Router, title: &str, completed: bool, order: i32) -> Todo {
    let body = serde_json::json!({
        "title": title,
        "completed": completed,
        "order": order
    });
    let (status, body) = send(app, json_request("POST", "/todos", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}
