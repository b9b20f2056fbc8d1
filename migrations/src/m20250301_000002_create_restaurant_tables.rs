use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string().not_null())
                    .col(
                        ColumnDef::new(Restaurants::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Restaurants::CeoName).string().not_null())
                    .col(
                        ColumnDef::new(Restaurants::TaxNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::RegistrationNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Restaurants::ContactNumber).string().null())
                    .col(ColumnDef::new(Restaurants::WhatsappNo).string().null())
                    .col(ColumnDef::new(Restaurants::WebsiteUrl).string().null())
                    .col(ColumnDef::new(Restaurants::FacebookUrl).string().null())
                    .col(ColumnDef::new(Restaurants::InstagramUrl).string().null())
                    .col(ColumnDef::new(Restaurants::Summary).text().null())
                    .col(ColumnDef::new(Restaurants::Description).text().null())
                    .col(
                        ColumnDef::new(Restaurants::Status)
                            .string()
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Restaurants::NumberOfEmployees)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Restaurants::OpeningTime).time().null())
                    .col(ColumnDef::new(Restaurants::ClosingTime).time().null())
                    .col(
                        ColumnDef::new(Restaurants::Delivery)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Takeaway)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Restaurants::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantStaff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantStaff::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantStaff::RestaurantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RestaurantStaff::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(RestaurantStaff::Role)
                            .string()
                            .not_null()
                            .default("EMPLOYEE"),
                    )
                    .col(
                        ColumnDef::new(RestaurantStaff::Status)
                            .string()
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(RestaurantStaff::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RestaurantStaff::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantStaff::UpdatedAt)
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
                    .name("idx_restaurant_staff_user")
                    .table(RestaurantStaff::Table)
                    .col(RestaurantStaff::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RestaurantAddresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RestaurantAddresses::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::RestaurantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RestaurantAddresses::Street).string().null())
                    .col(ColumnDef::new(RestaurantAddresses::Road).string().null())
                    .col(ColumnDef::new(RestaurantAddresses::City).string().null())
                    .col(ColumnDef::new(RestaurantAddresses::Region).string().null())
                    .col(
                        ColumnDef::new(RestaurantAddresses::PostalCode)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::Country)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::Latitude)
                            .decimal()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::Longitude)
                            .decimal()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RestaurantAddresses::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RestaurantAddresses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RestaurantStaff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Restaurants {
    Table,
    Id,
    Name,
    Slug,
    CeoName,
    TaxNumber,
    RegistrationNo,
    ContactNumber,
    WhatsappNo,
    WebsiteUrl,
    FacebookUrl,
    InstagramUrl,
    Summary,
    Description,
    Status,
    NumberOfEmployees,
    OpeningTime,
    ClosingTime,
    Delivery,
    Takeaway,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum RestaurantStaff {
    Table,
    Id,
    RestaurantId,
    UserId,
    Role,
    Status,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum RestaurantAddresses {
    Table,
    Id,
    RestaurantId,
    Street,
    Road,
    City,
    Region,
    PostalCode,
    Country,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
