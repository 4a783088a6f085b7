//! Schema migrations, applied at startup and by the test harness.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTodoTable)]
    }
}

pub struct CreateTodoTable;

impl MigrationName for CreateTodoTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_todo_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTodoTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Todos::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Todos::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Todos::Title).string().not_null())
            .col(
                ColumnDef::new(Todos::Completed)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Todos::Order).integer().null())
            .to_owned();

        manager.create_table(table).await?;
        tracing::info!(table = "todos", "Applied migration");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Todos {
    Table,
    Id,
    Title,
    Completed,
    Order,
}
