use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuCategories::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MenuCategories::RestaurantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MenuCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(MenuCategories::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MenuCategories::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MenuCategories::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MenuItems::MenuCategoryId).uuid().not_null())
                    .col(ColumnDef::new(MenuItems::RestaurantId).uuid().not_null())
                    .col(ColumnDef::new(MenuItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(MenuItems::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MenuItems::Price).decimal().not_null())
                    .col(ColumnDef::new(MenuItems::Description).text().null())
                    .col(
                        ColumnDef::new(MenuItems::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(MenuItems::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(MenuItems::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menu_items_restaurant")
                    .table(MenuItems::Table)
                    .col(MenuItems::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Modifiers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modifiers::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Modifiers::MenuItemId).uuid().not_null())
                    .col(ColumnDef::new(Modifiers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Modifiers::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Modifiers::Price).decimal().not_null())
                    .col(ColumnDef::new(Modifiers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Modifiers::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Modifiers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MenuCategories {
    Table,
    Id,
    RestaurantId,
    Name,
    Slug,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum MenuItems {
    Table,
    Id,
    MenuCategoryId,
    RestaurantId,
    Name,
    Slug,
    Price,
    Description,
    IsAvailable,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Modifiers {
    Table,
    Id,
    MenuItemId,
    Name,
    Slug,
    Price,
    CreatedAt,
    UpdatedAt,
}
