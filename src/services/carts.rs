use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    cart, cart_item, Cart, CartItem, CartItemModel, CartModel, MenuItem, Modifier, User,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Pre-order staging. Each user owns at most one cart; prices are
/// snapshotted at add time and survive later catalog changes.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct AddItemInput {
    pub menu_item_id: Uuid,
    pub modifier_id: Option<Uuid>,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// A cart with its lines, as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartWithItems {
    pub cart: CartModel,
    pub items: Vec<CartItemModel>,
}

impl CartWithItems {
    /// Sum of line snapshots times quantities.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    }
}

impl CartService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Returns the user's cart, creating an empty one on first use.
    #[instrument(skip(self))]
    pub async fn get_or_create_cart(&self, user_id: Uuid) -> Result<CartModel, ServiceError> {
        User::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        if let Some(existing) = Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
        {
            return Ok(existing);
        }

        let new_cart = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            version: Set(1),
            ..Default::default()
        };
        let created = new_cart.insert(&*self.db).await?;

        info!(cart_id = %created.id, %user_id, "cart created");
        self.event_sender
            .send_or_log(Event::CartCreated(created.id))
            .await;

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, cart_id: Uuid) -> Result<CartWithItems, ServiceError> {
        let cart = Cart::find_by_id(cart_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart {} not found", cart_id)))?;

        let items = cart.find_related(CartItem).all(&*self.db).await?;

        Ok(CartWithItems { cart, items })
    }

    #[instrument(skip(self))]
    pub async fn get_cart_for_user(&self, user_id: Uuid) -> Result<CartWithItems, ServiceError> {
        let cart = Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No cart found for user {}", user_id))
            })?;

        let items = cart.find_related(CartItem).all(&*self.db).await?;

        Ok(CartWithItems { cart, items })
    }

    /// Adds an item to the cart. The line price is snapshotted as item
    /// price plus modifier price; adding the same item-modifier pair
    /// again increments the quantity and keeps the original snapshot.
    #[instrument(skip(self, input), fields(menu_item_id = %input.menu_item_id))]
    pub async fn add_item(
        &self,
        cart_id: Uuid,
        input: AddItemInput,
    ) -> Result<CartWithItems, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let cart = Cart::find_by_id(cart_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart {} not found", cart_id)))?;

        let menu_item = MenuItem::find_by_id(input.menu_item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Menu item {} not found", input.menu_item_id))
            })?;
        if !menu_item.is_available {
            return Err(ServiceError::ValidationError(format!(
                "Menu item '{}' is not available",
                menu_item.name
            )));
        }

        let mut unit_price = menu_item.price;
        if let Some(modifier_id) = input.modifier_id {
            let modifier = Modifier::find_by_id(modifier_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Modifier {} not found", modifier_id))
                })?;
            if modifier.menu_item_id != menu_item.id {
                return Err(ServiceError::ValidationError(
                    "Modifier does not belong to this menu item".to_string(),
                ));
            }
            unit_price += modifier.price;
        }

        let existing = CartItem::find()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .filter(cart_item::Column::MenuItemId.eq(input.menu_item_id))
            .filter(match input.modifier_id {
                Some(id) => cart_item::Column::ModifierId.eq(id),
                None => cart_item::Column::ModifierId.is_null(),
            })
            .one(&txn)
            .await?;

        match existing {
            Some(line) => {
                let quantity = line.quantity + input.quantity;
                let mut active: cart_item::ActiveModel = line.into();
                active.quantity = Set(quantity);
                active.update(&txn).await?;
            }
            None => {
                let line = cart_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    cart_id: Set(cart.id),
                    menu_item_id: Set(input.menu_item_id),
                    modifier_id: Set(input.modifier_id),
                    quantity: Set(input.quantity),
                    price: Set(unit_price),
                    ..Default::default()
                };
                line.insert(&txn).await?;
            }
        }

        self.bump_version(cart, &txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartItemAdded {
                cart_id,
                menu_item_id: input.menu_item_id,
            })
            .await;

        self.get_cart(cart_id).await
    }

    /// Removes one line from the cart.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;

        let cart = Cart::find_by_id(cart_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart {} not found", cart_id)))?;

        let line = CartItem::find_by_id(item_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))?;
        if line.cart_id != cart.id {
            return Err(ServiceError::InvalidOperation(
                "Cart item belongs to a different cart".to_string(),
            ));
        }

        line.delete(&txn).await?;
        self.bump_version(cart, &txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartItemRemoved { cart_id, item_id })
            .await;

        self.get_cart(cart_id).await
    }

    /// Empties the cart without deleting it.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, cart_id: Uuid) -> Result<CartWithItems, ServiceError> {
        let txn = self.db.begin().await?;

        let cart = Cart::find_by_id(cart_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart {} not found", cart_id)))?;

        CartItem::delete_many()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .exec(&txn)
            .await?;
        self.bump_version(cart, &txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartCleared(cart_id))
            .await;

        self.get_cart(cart_id).await
    }

    /// Every cart mutation bumps the version so a checkout racing this
    /// change sees its guard fail.
    async fn bump_version(
        &self,
        cart: CartModel,
        txn: &sea_orm::DatabaseTransaction,
    ) -> Result<(), ServiceError> {
        let version = cart.version + 1;
        let mut active: cart::ActiveModel = cart.into();
        active.version = Set(version);
        active.update(txn).await?;
        Ok(())
    }
}
