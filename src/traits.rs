use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, entity::prelude::*};

pub trait MergeIntoActiveModel<ActiveModelType> {
    /// Merge this update model into an existing active model
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` if the merge operation fails due to data conversion issues.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}

/// Keyed storage for one resource type, backed by a Sea-ORM entity.
///
/// Every method has a default implementation in terms of the entity, so an
/// implementor only names its types and constants. Identifiers are integers
/// assigned by the database on insert.
#[async_trait]
pub trait CRUDResource: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    Self::ActiveModelType: ActiveModelTrait + ActiveModelBehavior + Send + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync + IntoActiveModel<Self::ActiveModelType>,
    <<Self::EntityType as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    <<Self::EntityType as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: Into<i32>,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait + Sync;
    type ColumnType: ColumnTrait + std::fmt::Debug;
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>;
    type CreateModel: Into<Self::ActiveModelType> + Send;
    type UpdateModel: Send + Sync + MergeIntoActiveModel<Self::ActiveModelType>;

    const ID_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &str;
    const RESOURCE_NAME_PLURAL: &str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    /// All rows in insertion order.
    async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        let models = Self::EntityType::find()
            .order_by_asc(Self::ID_COLUMN)
            .all(db)
            .await?;
        tracing::debug!(
            resource = Self::RESOURCE_NAME_PLURAL,
            count = models.len(),
            "Listed rows"
        );
        Ok(models.into_iter().map(Self::from).collect())
    }

    /// Point lookup that reports absence as `None`.
    async fn find_one(db: &DatabaseConnection, id: i32) -> Result<Option<Self>, DbErr> {
        let model = Self::EntityType::find_by_id(id).one(db).await?;
        Ok(model.map(Self::from))
    }

    /// Point lookup that reports absence as `DbErr::RecordNotFound`.
    async fn get_one(db: &DatabaseConnection, id: i32) -> Result<Self, DbErr> {
        Self::find_one(db, id)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            )))
    }

    async fn create(
        db: &DatabaseConnection,
        create_model: Self::CreateModel,
    ) -> Result<Self, DbErr> {
        let active_model: Self::ActiveModelType = create_model.into();
        let result = Self::EntityType::insert(active_model).exec(db).await?;
        let id: i32 = result.last_insert_id.into();
        tracing::debug!(resource = Self::RESOURCE_NAME_SINGULAR, id, "Inserted row");
        Self::get_one(db, id).await
    }

    /// Replaces every writable field of an existing row.
    async fn update(
        db: &DatabaseConnection,
        id: i32,
        update_model: Self::UpdateModel,
    ) -> Result<Self, DbErr> {
        let model = Self::EntityType::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            )))?;
        let existing: Self::ActiveModelType = model.into_active_model();
        let updated_model = update_model.merge_into_activemodel(existing)?;
        let updated = updated_model.update(db).await?;
        tracing::debug!(resource = Self::RESOURCE_NAME_SINGULAR, id, "Updated row");
        Ok(Self::from(updated))
    }

    /// Deletes by id and returns the number of rows removed.
    ///
    /// A missing id removes nothing and is not an error.
    async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
        let res = Self::EntityType::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            tracing::debug!(
                resource = Self::RESOURCE_NAME_SINGULAR,
                id,
                "Delete matched no rows"
            );
        }
        Ok(res.rows_affected)
    }

    /// Clears the whole table.
    async fn delete_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
        let res = Self::EntityType::delete_many().exec(db).await?;
        tracing::debug!(
            resource = Self::RESOURCE_NAME_PLURAL,
            rows = res.rows_affected,
            "Cleared table"
        );
        Ok(res.rows_affected)
    }
}
