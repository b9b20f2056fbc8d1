use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::audit;
use crate::entities::{
    order, DeliveryStatus, Order, OrderItem, OrderItemModel, OrderModel, OrderStatus, OrderType,
    User,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Order lifecycle after checkout: cancellation, delivery assignment,
/// and the delivery progression.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

/// An order with its lines.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: OrderModel,
    pub items: Vec<OrderItemModel>,
}

/// Whether a delivery status move is part of the forward progression.
/// Cancellation is handled separately because it must also cancel the
/// order itself.
pub fn delivery_transition_allowed(from: DeliveryStatus, to: DeliveryStatus) -> bool {
    matches!(
        (from, to),
        (DeliveryStatus::Pending, DeliveryStatus::OutForDelivery)
            | (DeliveryStatus::OutForDelivery, DeliveryStatus::Delivered)
    )
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        Order::find_by_id(order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    #[instrument(skip(self))]
    pub async fn get_order_with_items(
        &self,
        order_id: Uuid,
    ) -> Result<OrderWithItems, ServiceError> {
        let order = self.get_order(order_id).await?;
        let items = order.find_related(OrderItem).all(&*self.db).await?;
        Ok(OrderWithItems { order, items })
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_user(
        &self,
        user_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<OrderModel>, u64), ServiceError> {
        let paginator = Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((orders, total))
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_restaurant(
        &self,
        restaurant_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<OrderModel>, u64), ServiceError> {
        let paginator = Order::find()
            .filter(order::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((orders, total))
    }

    /// Cancels a pending order. Both status fields move to CANCELLED
    /// together; an order that settled or went out for delivery can no
    /// longer be cancelled.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if order.order_status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "Order is already {}",
                order.order_status.label()
            )));
        }
        if order.delivery_status != DeliveryStatus::Pending {
            return Err(ServiceError::Conflict(format!(
                "Order delivery is already {}",
                order.delivery_status.label()
            )));
        }

        let old_order_status = order.order_status;
        let old_delivery_status = order.delivery_status;
        let version = order.version + 1;

        let mut active: order::ActiveModel = order.into();
        active.order_status = Set(OrderStatus::Cancelled);
        active.delivery_status = Set(DeliveryStatus::Cancelled);
        active.version = Set(version);
        let order = active.update(&txn).await?;

        audit::record(
            &txn,
            "order",
            order.id,
            "cancelled",
            Some(serde_json::json!({
                "from": old_order_status.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        info!(order_id = %order.id, "order cancelled");
        self.event_sender
            .send_or_log(Event::OrderCancelled(order.id))
            .await;
        self.event_sender
            .send_or_log(Event::OrderStatusChanged {
                order_id: order.id,
                old_status: old_order_status,
                new_status: OrderStatus::Cancelled,
            })
            .await;
        self.event_sender
            .send_or_log(Event::DeliveryStatusChanged {
                order_id: order.id,
                old_status: old_delivery_status,
                new_status: DeliveryStatus::Cancelled,
            })
            .await;

        Ok(order)
    }

    /// Assigns a delivery agent. Only delivery orders take an agent,
    /// and only while the delivery is still pending.
    #[instrument(skip(self))]
    pub async fn assign_delivery_agent(
        &self,
        order_id: Uuid,
        agent_id: Uuid,
    ) -> Result<OrderModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if order.order_type != OrderType::Delivery {
            return Err(ServiceError::InvalidOperation(
                "Takeaway orders do not take a delivery agent".to_string(),
            ));
        }
        if order.delivery_status != DeliveryStatus::Pending {
            return Err(ServiceError::Conflict(format!(
                "Delivery is already {}",
                order.delivery_status.label()
            )));
        }

        User::find_by_id(agent_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", agent_id)))?;

        let version = order.version + 1;
        let mut active: order::ActiveModel = order.into();
        active.delivery_agent_id = Set(Some(agent_id));
        active.version = Set(version);
        let order = active.update(&txn).await?;

        audit::record(
            &txn,
            "order",
            order.id,
            "agent_assigned",
            Some(serde_json::json!({ "agent_id": agent_id })),
        )
        .await?;
        txn.commit().await?;

        Ok(order)
    }

    /// Moves the delivery to OUT_FOR_DELIVERY. Requires a settled
    /// (COMPLETED) order and an assigned agent.
    #[instrument(skip(self))]
    pub async fn mark_out_for_delivery(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !delivery_transition_allowed(order.delivery_status, DeliveryStatus::OutForDelivery) {
            return Err(ServiceError::Conflict(format!(
                "Cannot dispatch a delivery that is {}",
                order.delivery_status.label()
            )));
        }
        if order.order_status != OrderStatus::Completed {
            return Err(ServiceError::Conflict(
                "Order payment has not completed".to_string(),
            ));
        }
        if order.order_type == OrderType::Delivery && order.delivery_agent_id.is_none() {
            return Err(ServiceError::Conflict(
                "No delivery agent assigned".to_string(),
            ));
        }

        self.advance_delivery(order, DeliveryStatus::OutForDelivery, "dispatched", txn)
            .await
    }

    /// Moves the delivery to DELIVERED, its terminal success state.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, order_id: Uuid) -> Result<OrderModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !delivery_transition_allowed(order.delivery_status, DeliveryStatus::Delivered) {
            return Err(ServiceError::Conflict(format!(
                "Cannot deliver an order that is {}",
                order.delivery_status.label()
            )));
        }

        self.advance_delivery(order, DeliveryStatus::Delivered, "delivered", txn)
            .await
    }

    async fn advance_delivery(
        &self,
        order: OrderModel,
        to: DeliveryStatus,
        action: &str,
        txn: sea_orm::DatabaseTransaction,
    ) -> Result<OrderModel, ServiceError> {
        let old = order.delivery_status;
        let version = order.version + 1;

        let mut active: order::ActiveModel = order.into();
        active.delivery_status = Set(to);
        active.version = Set(version);
        let order = active.update(&txn).await?;

        audit::record(
            &txn,
            "order",
            order.id,
            action,
            Some(serde_json::json!({
                "from": old.label(),
                "to": to.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        info!(order_id = %order.id, from = old.label(), to = to.label(), "delivery advanced");
        self.event_sender
            .send_or_log(Event::DeliveryStatusChanged {
                order_id: order.id,
                old_status: old,
                new_status: to,
            })
            .await;

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_progression_is_allowed() {
        assert!(delivery_transition_allowed(
            DeliveryStatus::Pending,
            DeliveryStatus::OutForDelivery
        ));
        assert!(delivery_transition_allowed(
            DeliveryStatus::OutForDelivery,
            DeliveryStatus::Delivered
        ));
    }

    #[test]
    fn test_skipping_and_reversing_are_rejected() {
        assert!(!delivery_transition_allowed(
            DeliveryStatus::Pending,
            DeliveryStatus::Delivered
        ));
        assert!(!delivery_transition_allowed(
            DeliveryStatus::Delivered,
            DeliveryStatus::OutForDelivery
        ));
        assert!(!delivery_transition_allowed(
            DeliveryStatus::OutForDelivery,
            DeliveryStatus::Pending
        ));
    }

    #[test]
    fn test_terminal_states_do_not_move() {
        for to in [
            DeliveryStatus::Pending,
            DeliveryStatus::OutForDelivery,
            DeliveryStatus::Delivered,
        ] {
            assert!(!delivery_transition_allowed(DeliveryStatus::Cancelled, to));
        }
        assert!(!delivery_transition_allowed(
            DeliveryStatus::Delivered,
            DeliveryStatus::Delivered
        ));
    }
}
