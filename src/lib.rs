//! # todos
//!
//! A Todo list REST service: Axum handlers over a Sea-ORM store.
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | `GET` | `/todos` | every todo, in insertion order |
//! | `GET` | `/todos/{id}` | one todo, or 404 |
//! | `POST` | `/todos` | 201 with the created todo |
//! | `PUT` | `/todos/{id}` | the replaced todo, or 404 |
//! | `DELETE` | `/todos/{id}` | 200, also when the id is already gone |
//!
//! ```rust,ignore
//! let config = todos::Config::from_env()?;
//! let db = todos::connect(&config).await?;
//! let app = todos::app(&db);
//! ```

pub mod config;
pub mod errors;
pub mod migration;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod todo;
pub mod traits;

pub use config::Config;
pub use errors::{ApiError, ServerError};
pub use server::{app, connect, serve};
pub use todo::{Todo, TodoCreate, TodoUpdate};
pub use traits::CRUDResource;
