use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::audit;
use crate::entities::{
    menu_category, menu_item, modifier, MenuCategory, MenuCategoryModel, MenuItem, MenuItemModel,
    Modifier, ModifierModel, Restaurant,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::slug::{dedupe_slug, slugify};

/// Catalog management: categories, menu items, and modifiers.
#[derive(Clone)]
pub struct MenuService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCategoryInput {
    pub restaurant_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateMenuItemInput {
    pub menu_category_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateModifierInput {
    pub menu_item_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub price: Decimal,
}

/// A category together with its items, as served on the public menu.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuSection {
    pub category: MenuCategoryModel,
    pub items: Vec<MenuItemModel>,
}

impl MenuService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<MenuCategoryModel, ServiceError> {
        input.validate()?;

        Restaurant::find_by_id(input.restaurant_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", input.restaurant_id))
            })?;

        let base = slugify(&input.name);
        let taken: Vec<String> = MenuCategory::find()
            .filter(menu_category::Column::Slug.starts_with(base.clone()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|c| c.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let category = menu_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            restaurant_id: Set(input.restaurant_id),
            name: Set(input.name),
            slug: Set(slug),
            ..Default::default()
        };
        let category = category.insert(&*self.db).await?;

        Ok(category)
    }

    /// Creates a menu item under a category. The item inherits the
    /// category's restaurant so cart and order lookups avoid a join.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_menu_item(
        &self,
        input: CreateMenuItemInput,
    ) -> Result<MenuItemModel, ServiceError> {
        input.validate()?;
        if input.price <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Price must be greater than zero".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let category = MenuCategory::find_by_id(input.menu_category_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Menu category {} not found",
                    input.menu_category_id
                ))
            })?;

        let base = slugify(&input.name);
        let taken: Vec<String> = MenuItem::find()
            .filter(menu_item::Column::Slug.starts_with(base.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|i| i.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let item = menu_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            menu_category_id: Set(category.id),
            restaurant_id: Set(category.restaurant_id),
            name: Set(input.name),
            slug: Set(slug),
            price: Set(input.price),
            description: Set(input.description),
            is_available: Set(input.is_available),
            ..Default::default()
        };
        let item = item.insert(&txn).await?;

        audit::record(&txn, "menu_item", item.id, "created", None).await?;
        txn.commit().await?;

        info!(menu_item_id = %item.id, "menu item created");
        self.event_sender
            .send_or_log(Event::MenuItemCreated(item.id))
            .await;

        Ok(item)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_modifier(
        &self,
        input: CreateModifierInput,
    ) -> Result<ModifierModel, ServiceError> {
        input.validate()?;
        if input.price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Modifier price cannot be negative".to_string(),
            ));
        }

        MenuItem::find_by_id(input.menu_item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Menu item {} not found", input.menu_item_id))
            })?;

        let base = slugify(&input.name);
        let taken: Vec<String> = Modifier::find()
            .filter(modifier::Column::Slug.starts_with(base.clone()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|m| m.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let modifier = modifier::ActiveModel {
            id: Set(Uuid::new_v4()),
            menu_item_id: Set(input.menu_item_id),
            name: Set(input.name),
            slug: Set(slug),
            price: Set(input.price),
            ..Default::default()
        };
        let modifier = modifier.insert(&*self.db).await?;

        Ok(modifier)
    }

    #[instrument(skip(self))]
    pub async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<MenuItemModel, ServiceError> {
        MenuItem::find_by_id(menu_item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Menu item {} not found", menu_item_id))
            })
    }

    /// Flips an item's availability. Unavailable items stay visible on
    /// the menu but cannot be added to carts.
    #[instrument(skip(self))]
    pub async fn set_item_availability(
        &self,
        menu_item_id: Uuid,
        available: bool,
    ) -> Result<MenuItemModel, ServiceError> {
        let txn = self.db.begin().await?;

        let item = MenuItem::find_by_id(menu_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Menu item {} not found", menu_item_id))
            })?;

        let mut active: menu_item::ActiveModel = item.into();
        active.is_available = Set(available);
        let item = active.update(&txn).await?;

        audit::record(
            &txn,
            "menu_item",
            item.id,
            "availability_changed",
            Some(serde_json::json!({ "available": available })),
        )
        .await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::MenuItemAvailabilityChanged {
                menu_item_id: item.id,
                available,
            })
            .await;

        Ok(item)
    }

    /// Reprices an item. Existing cart lines keep their snapshot; only
    /// additions after this call see the new price.
    #[instrument(skip(self))]
    pub async fn update_item_price(
        &self,
        menu_item_id: Uuid,
        price: Decimal,
    ) -> Result<MenuItemModel, ServiceError> {
        if price <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Price must be greater than zero".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let item = MenuItem::find_by_id(menu_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Menu item {} not found", menu_item_id))
            })?;

        let old_price = item.price;
        let mut active: menu_item::ActiveModel = item.into();
        active.price = Set(price);
        let item = active.update(&txn).await?;

        audit::record(
            &txn,
            "menu_item",
            item.id,
            "price_changed",
            Some(serde_json::json!({
                "from": old_price,
                "to": price,
            })),
        )
        .await?;
        txn.commit().await?;

        Ok(item)
    }

    /// The full menu of a restaurant, grouped by category.
    #[instrument(skip(self))]
    pub async fn get_menu(&self, restaurant_id: Uuid) -> Result<Vec<MenuSection>, ServiceError> {
        Restaurant::find_by_id(restaurant_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
            })?;

        let categories = MenuCategory::find()
            .filter(menu_category::Column::RestaurantId.eq(restaurant_id))
            .all(&*self.db)
            .await?;

        let mut sections = Vec::with_capacity(categories.len());
        for category in categories {
            let items = MenuItem::find()
                .filter(menu_item::Column::MenuCategoryId.eq(category.id))
                .all(&*self.db)
                .await?;
            sections.push(MenuSection { category, items });
        }

        Ok(sections)
    }

    #[instrument(skip(self))]
    pub async fn list_modifiers(
        &self,
        menu_item_id: Uuid,
    ) -> Result<Vec<ModifierModel>, ServiceError> {
        let modifiers = Modifier::find()
            .filter(modifier::Column::MenuItemId.eq(menu_item_id))
            .all(&*self.db)
            .await?;
        Ok(modifiers)
    }
}
