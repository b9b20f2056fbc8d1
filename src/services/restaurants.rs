use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::audit;
use crate::entities::{
    restaurant, restaurant_address, restaurant_staff, AccountStatus, Restaurant,
    RestaurantAddress, RestaurantAddressModel, RestaurantModel, RestaurantStaff,
    RestaurantStaffModel, StaffRole, User,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::slug::{dedupe_slug, slugify};

/// Restaurant registry: profiles, addresses, and staff memberships.
#[derive(Clone)]
pub struct RestaurantService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateRestaurantInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub ceo_name: String,
    #[validate(length(min = 1, max = 30))]
    pub tax_number: String,
    #[validate(length(min = 1, max = 30))]
    pub registration_no: String,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(max = 20))]
    pub whatsapp_no: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub facebook_url: Option<String>,
    #[validate(url)]
    pub instagram_url: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    pub description: Option<String>,
    pub number_of_employees: Option<i32>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub takeaway: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct AddAddressInput {
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 255))]
    pub road: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AddStaffInput {
    pub user_id: Uuid,
    pub role: StaffRole,
    #[serde(default)]
    pub is_default: bool,
}

impl RestaurantService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Creates a restaurant. Tax number and registration number are
    /// unique across the registry.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_restaurant(
        &self,
        input: CreateRestaurantInput,
    ) -> Result<RestaurantModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let duplicate = Restaurant::find()
            .filter(
                restaurant::Column::TaxNumber
                    .eq(input.tax_number.clone())
                    .or(restaurant::Column::RegistrationNo.eq(input.registration_no.clone())),
            )
            .one(&txn)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(
                "A restaurant with this tax number or registration number already exists"
                    .to_string(),
            ));
        }

        let base = slugify(&input.name);
        let taken: Vec<String> = Restaurant::find()
            .filter(restaurant::Column::Slug.starts_with(base.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|r| r.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let restaurant = restaurant::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            slug: Set(slug),
            ceo_name: Set(input.ceo_name),
            tax_number: Set(input.tax_number),
            registration_no: Set(input.registration_no),
            contact_number: Set(input.contact_number),
            whatsapp_no: Set(input.whatsapp_no),
            website_url: Set(input.website_url),
            facebook_url: Set(input.facebook_url),
            instagram_url: Set(input.instagram_url),
            summary: Set(input.summary),
            description: Set(input.description),
            status: Set(AccountStatus::Active),
            number_of_employees: Set(input.number_of_employees),
            opening_time: Set(input.opening_time),
            closing_time: Set(input.closing_time),
            delivery: Set(input.delivery),
            takeaway: Set(input.takeaway),
            ..Default::default()
        };
        let restaurant = restaurant.insert(&txn).await?;

        audit::record(&txn, "restaurant", restaurant.id, "created", None).await?;
        txn.commit().await?;

        info!(restaurant_id = %restaurant.id, "restaurant created");
        self.event_sender
            .send_or_log(Event::RestaurantCreated(restaurant.id))
            .await;

        Ok(restaurant)
    }

    #[instrument(skip(self))]
    pub async fn get_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<RestaurantModel, ServiceError> {
        Restaurant::find_by_id(restaurant_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn get_restaurant_by_slug(
        &self,
        slug: &str,
    ) -> Result<RestaurantModel, ServiceError> {
        Restaurant::find()
            .filter(restaurant::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Restaurant {} not found", slug)))
    }

    #[instrument(skip(self))]
    pub async fn list_restaurants(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<RestaurantModel>, u64), ServiceError> {
        let paginator = Restaurant::find().paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let restaurants = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((restaurants, total))
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        restaurant_id: Uuid,
        status: AccountStatus,
    ) -> Result<RestaurantModel, ServiceError> {
        let txn = self.db.begin().await?;

        let restaurant = Restaurant::find_by_id(restaurant_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
            })?;

        if restaurant.status == AccountStatus::Removed {
            return Err(ServiceError::Conflict(
                "Removed restaurants cannot change status".to_string(),
            ));
        }

        let old = restaurant.status;
        let mut active: restaurant::ActiveModel = restaurant.into();
        active.status = Set(status);
        let restaurant = active.update(&txn).await?;

        audit::record(
            &txn,
            "restaurant",
            restaurant.id,
            "status_changed",
            Some(serde_json::json!({
                "from": old.label(),
                "to": status.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        Ok(restaurant)
    }

    /// Attaches a mailing address to a restaurant.
    #[instrument(skip(self, input))]
    pub async fn add_address(
        &self,
        restaurant_id: Uuid,
        input: AddAddressInput,
    ) -> Result<RestaurantAddressModel, ServiceError> {
        input.validate()?;

        Restaurant::find_by_id(restaurant_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
            })?;

        let address = restaurant_address::ActiveModel {
            id: Set(Uuid::new_v4()),
            restaurant_id: Set(restaurant_id),
            street: Set(input.street),
            road: Set(input.road),
            city: Set(input.city),
            region: Set(input.region),
            postal_code: Set(input.postal_code),
            country: Set(input.country),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            ..Default::default()
        };
        let address = address.insert(&*self.db).await?;

        Ok(address)
    }

    #[instrument(skip(self))]
    pub async fn list_addresses(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<RestaurantAddressModel>, ServiceError> {
        let addresses = RestaurantAddress::find()
            .filter(restaurant_address::Column::RestaurantId.eq(restaurant_id))
            .all(&*self.db)
            .await?;
        Ok(addresses)
    }

    /// Adds a user to a restaurant's staff. A user holds at most one
    /// membership per restaurant and at most one default membership
    /// overall; marking this one default clears any previous default.
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn add_staff(
        &self,
        restaurant_id: Uuid,
        input: AddStaffInput,
    ) -> Result<RestaurantStaffModel, ServiceError> {
        let txn = self.db.begin().await?;

        Restaurant::find_by_id(restaurant_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
            })?;
        User::find_by_id(input.user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", input.user_id)))?;

        let existing = RestaurantStaff::find()
            .filter(restaurant_staff::Column::RestaurantId.eq(restaurant_id))
            .filter(restaurant_staff::Column::UserId.eq(input.user_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "User is already a staff member of this restaurant".to_string(),
            ));
        }

        if input.is_default {
            RestaurantStaff::update_many()
                .col_expr(restaurant_staff::Column::IsDefault, Expr::value(false))
                .col_expr(
                    restaurant_staff::Column::UpdatedAt,
                    Expr::value(Utc::now()),
                )
                .filter(restaurant_staff::Column::UserId.eq(input.user_id))
                .filter(restaurant_staff::Column::IsDefault.eq(true))
                .exec(&txn)
                .await?;
        }

        let membership = restaurant_staff::ActiveModel {
            id: Set(Uuid::new_v4()),
            restaurant_id: Set(restaurant_id),
            user_id: Set(input.user_id),
            role: Set(input.role),
            status: Set(AccountStatus::Active),
            is_default: Set(input.is_default),
            ..Default::default()
        };
        let membership = membership.insert(&txn).await?;

        audit::record(
            &txn,
            "restaurant_staff",
            membership.id,
            "added",
            Some(serde_json::json!({
                "restaurant_id": restaurant_id,
                "user_id": input.user_id,
                "role": input.role.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        Ok(membership)
    }

    #[instrument(skip(self))]
    pub async fn list_staff(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<RestaurantStaffModel>, ServiceError> {
        let staff = RestaurantStaff::find()
            .filter(restaurant_staff::Column::RestaurantId.eq(restaurant_id))
            .all(&*self.db)
            .await?;
        Ok(staff)
    }
}
