use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::errors::ApiError;
use crate::todo::{Todo, TodoCreate, TodoUpdate};
use crate::traits::CRUDResource;

/// Ids are stored as `i32`; any other integer names a todo that cannot exist.
fn stored_id(requested: i64) -> Option<i32> {
    i32::try_from(requested).ok()
}

fn todo_not_found(requested: i64) -> ApiError {
    ApiError::not_found(Todo::RESOURCE_NAME_SINGULAR, Some(requested.to_string()))
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Every todo in insertion order", body = [Todo]),
        (status = 500, description = "Internal Server Error")
    ),
    summary = "Get all todos"
)]
pub async fn get_all_handler(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let items = Todo::get_all(&db).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The requested todo", body = Todo),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "Todo not found"),
        (status = 500, description = "Internal Server Error")
    ),
    summary = "Get one todo"
)]
pub async fn get_one_handler(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(requested) = path?;
    let id = stored_id(requested).ok_or_else(|| todo_not_found(requested))?;
    match Todo::find_one(&db, id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(todo_not_found(requested)),
    }
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = TodoCreate,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Malformed JSON"),
        (status = 415, description = "Missing JSON content type"),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Internal Server Error")
    ),
    summary = "Create one todo"
)]
pub async fn create_one_handler(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<TodoCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(payload) = payload?;
    let created = Todo::create(&db, payload).await?;
    tracing::info!(id = created.id, "Created todo");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    request_body = TodoUpdate,
    responses(
        (status = 200, description = "Todo replaced", body = Todo),
        (status = 400, description = "Malformed JSON or id"),
        (status = 404, description = "Todo not found"),
        (status = 415, description = "Missing JSON content type"),
        (status = 422, description = "Missing or mistyped field"),
        (status = 500, description = "Internal Server Error")
    ),
    summary = "Replace one todo"
)]
pub async fn update_one_handler(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TodoUpdate>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(requested) = path?;
    let Json(payload) = payload?;
    let id = stored_id(requested).ok_or_else(|| todo_not_found(requested))?;
    let updated = Todo::update(&db, id, payload)
        .await
        .map_err(|err| match err {
            sea_orm::DbErr::RecordNotFound(_) => todo_not_found(requested),
            other => ApiError::from(other),
        })?;
    tracing::info!(id, "Updated todo");
    Ok(Json(updated))
}

/// Deletes a todo by id.
///
/// Deleting an id that does not exist also answers 200, so repeated deletes
/// are safe.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = i64, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo deleted, or already absent"),
        (status = 400, description = "Id is not an integer"),
        (status = 500, description = "Internal Server Error")
    ),
    summary = "Delete one todo"
)]
pub async fn delete_one_handler(
    State(db): State<DatabaseConnection>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(requested) = path?;
    let removed = match stored_id(requested) {
        Some(id) => Todo::delete(&db, id).await?,
        None => 0,
    };
    tracing::info!(id = requested, removed, "Deleted todo");
    Ok(StatusCode::OK)
}

/// Router with every todo endpoint, bound to the given connection.
pub fn router(db: &DatabaseConnection) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_handler, create_one_handler))
        .routes(routes!(
            get_one_handler,
            update_one_handler,
            delete_one_handler
        ))
        .with_state(db.clone())
}
