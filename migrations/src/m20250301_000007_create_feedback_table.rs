use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerFeedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerFeedback::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerFeedback::Title).string().not_null())
                    .col(
                        ColumnDef::new(CustomerFeedback::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerFeedback::CustomerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomerFeedback::MenuItemId).uuid().null())
                    .col(ColumnDef::new(CustomerFeedback::OrderId).uuid().null())
                    .col(
                        ColumnDef::new(CustomerFeedback::RestaurantId)
                            .uuid()
                            .null(),
                    )
                    .col(ColumnDef::new(CustomerFeedback::Rating).integer().null())
                    .col(ColumnDef::new(CustomerFeedback::Comment).text().null())
                    .col(
                        ColumnDef::new(CustomerFeedback::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerFeedback::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_feedback_restaurant")
                    .table(CustomerFeedback::Table)
                    .col(CustomerFeedback::RestaurantId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerFeedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CustomerFeedback {
    Table,
    Id,
    Title,
    Slug,
    CustomerId,
    MenuItemId,
    OrderId,
    RestaurantId,
    Rating,
    Comment,
    CreatedAt,
    UpdatedAt,
}
