//! The `todos` table and its API-facing models.

use sea_orm::{
    ActiveValue::{NotSet, Set},
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::traits::{CRUDResource, MergeIntoActiveModel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub order: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A persisted todo item as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Assigned by the database on creation, never reused.
    pub id: i32,
    pub title: String,
    pub completed: bool,
    /// Client-side ordering hint.
    pub order: Option<i32>,
}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            completed: model.completed,
            order: model.order,
        }
    }
}

/// Request body for `POST /todos`. Any `id` in the body is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub order: Option<i32>,
}

impl From<TodoCreate> for ActiveModel {
    fn from(create: TodoCreate) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(create.title),
            completed: Set(create.completed),
            order: Set(create.order),
        }
    }
}

/// Request body for `PUT /todos/{id}`.
///
/// The update replaces the whole record: an omitted `completed` resets to
/// `false` and an omitted `order` clears it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoUpdate {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub order: Option<i32>,
}

impl MergeIntoActiveModel<ActiveModel> for TodoUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        existing.title = Set(self.title);
        existing.completed = Set(self.completed);
        existing.order = Set(self.order);
        Ok(existing)
    }
}

impl CRUDResource for Todo {
    type EntityType = Entity;
    type ColumnType = Column;
    type ActiveModelType = ActiveModel;
    type CreateModel = TodoCreate;
    type UpdateModel = TodoUpdate;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "todo";
    const RESOURCE_NAME_PLURAL: &'static str = "todos";
    const RESOURCE_DESCRIPTION: &'static str =
        "Items of a todo list with a completion flag and an ordering hint.";
}
