use std::collections::HashSet;
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

use crate::audit;
use crate::entities::{
    cart, cart_item, order, order_item, Cart, CartItem, DeliveryStatus, MenuItem, OrderModel,
    OrderStatus, OrderType,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Converts a cart into an order atomically. The cart is consumed on
/// success; a cart that changed since it was read loses the race and
/// the caller gets a conflict.
#[derive(Clone)]
pub struct CheckoutService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CheckoutInput {
    pub order_type: OrderType,
    #[validate(length(min = 1, max = 255))]
    pub delivery_address: String,
}

impl CheckoutService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Places an order from the cart's current contents.
    ///
    /// All lines must come from a single restaurant. Line snapshots are
    /// copied verbatim; the total is their sum. On success the cart and
    /// its lines are deleted, so at most one order can ever be placed
    /// from a given cart.
    #[instrument(skip(self, input), fields(order_type = input.order_type.label()))]
    pub async fn checkout(
        &self,
        cart_id: Uuid,
        input: CheckoutInput,
    ) -> Result<OrderModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let cart = Cart::find_by_id(cart_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cart {} not found", cart_id)))?;

        let lines = cart.find_related(CartItem).all(&txn).await?;
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "Cannot check out an empty cart".to_string(),
            ));
        }

        let mut restaurant_ids = HashSet::new();
        for line in &lines {
            let menu_item = MenuItem::find_by_id(line.menu_item_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Menu item {} not found", line.menu_item_id))
                })?;
            restaurant_ids.insert(menu_item.restaurant_id);
        }
        if restaurant_ids.len() > 1 {
            return Err(ServiceError::ValidationError(
                "Cart contains items from more than one restaurant".to_string(),
            ));
        }
        let restaurant_id = restaurant_ids
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::InternalError("Cart has no restaurant".to_string()))?;

        let total: Decimal = lines
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum();

        let new_order = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(cart.user_id),
            restaurant_id: Set(restaurant_id),
            total_price: Set(total),
            delivery_status: Set(DeliveryStatus::Pending),
            order_status: Set(OrderStatus::Pending),
            order_type: Set(input.order_type),
            delivery_agent_id: Set(None),
            delivery_address: Set(input.delivery_address),
            version: Set(1),
            ..Default::default()
        };
        let placed = new_order.insert(&txn).await?;

        for line in &lines {
            let order_line = order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(placed.id),
                menu_item_id: Set(line.menu_item_id),
                modifier_id: Set(line.modifier_id),
                quantity: Set(line.quantity),
                price: Set(line.price),
                ..Default::default()
            };
            order_line.insert(&txn).await?;
        }

        // The version filter is the concurrency guard: a cart mutated
        // or checked out after our read no longer matches.
        let deleted = Cart::delete_many()
            .filter(cart::Column::Id.eq(cart.id))
            .filter(cart::Column::Version.eq(cart.version))
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::Conflict(
                "Cart was modified concurrently, retry checkout".to_string(),
            ));
        }
        CartItem::delete_many()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .exec(&txn)
            .await?;

        audit::record(
            &txn,
            "order",
            placed.id,
            "placed",
            Some(serde_json::json!({
                "cart_id": cart.id,
                "total_price": placed.total_price,
                "order_type": placed.order_type.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        info!(order_id = %placed.id, %cart_id, total = %placed.total_price, "order placed");
        self.event_sender
            .send_or_log(Event::CheckoutCompleted {
                cart_id,
                order_id: placed.id,
            })
            .await;

        Ok(placed)
    }
}
