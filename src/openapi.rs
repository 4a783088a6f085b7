use utoipa::OpenApi;
use utoipa::openapi::tag::TagBuilder;

use crate::todo::Todo;
use crate::traits::CRUDResource;

/// Base OpenAPI document; the todo paths and schemas are merged in from
/// the router in [`crate::server::app`].
#[derive(OpenApi)]
#[openapi(info(
    title = "Todos",
    description = "REST API for a todo list backed by a relational store."
))]
pub struct ApiDoc;

/// [`ApiDoc`] with one tag per resource, described by the resource itself.
#[must_use]
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.tags = Some(vec![
        TagBuilder::new()
            .name(Todo::RESOURCE_NAME_PLURAL)
            .description(Some(Todo::RESOURCE_DESCRIPTION))
            .build(),
    ]);
    doc
}
