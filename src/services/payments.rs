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

use crate::audit;
use crate::entities::{
    order, payment, Order, OrderStatus, Payment, PaymentMethod, PaymentModel, PaymentStatus,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Payment capture and settlement. At most one payment per order; the
/// settlement outcome drives the order's own status.
#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecordPaymentInput {
    pub order_id: Uuid,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
}

impl PaymentService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Records a pending payment against an order. The amount must
    /// match the order total exactly.
    #[instrument(skip(self, input), fields(order_id = %input.order_id))]
    pub async fn record_payment(
        &self,
        input: RecordPaymentInput,
    ) -> Result<PaymentModel, ServiceError> {
        let txn = self.db.begin().await?;

        let order = Order::find_by_id(input.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", input.order_id))
            })?;

        if order.order_status != OrderStatus::Pending {
            return Err(ServiceError::Conflict(format!(
                "Order is {}, not awaiting payment",
                order.order_status.label()
            )));
        }

        let existing = Payment::find()
            .filter(payment::Column::OrderId.eq(order.id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "A payment is already recorded for this order".to_string(),
            ));
        }

        if input.amount != order.total_price {
            return Err(ServiceError::ValidationError(format!(
                "Payment amount {} does not match order total {}",
                input.amount, order.total_price
            )));
        }

        let payment = payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            amount: Set(input.amount),
            payment_method: Set(input.payment_method),
            payment_status: Set(PaymentStatus::Pending),
            ..Default::default()
        };
        let payment = payment.insert(&txn).await?;

        audit::record(
            &txn,
            "payment",
            payment.id,
            "recorded",
            Some(serde_json::json!({
                "order_id": order.id,
                "amount": payment.amount,
                "method": payment.payment_method.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        info!(payment_id = %payment.id, order_id = %order.id, "payment recorded");
        self.event_sender
            .send_or_log(Event::PaymentRecorded(payment.id))
            .await;

        Ok(payment)
    }

    /// Settles a pending payment as COMPLETED or FAILED and cascades
    /// the outcome to the order in the same transaction. Settlement is
    /// final.
    #[instrument(skip(self))]
    pub async fn settle(
        &self,
        payment_id: Uuid,
        outcome: PaymentStatus,
    ) -> Result<PaymentModel, ServiceError> {
        if !outcome.is_terminal() {
            return Err(ServiceError::ValidationError(
                "Settlement outcome must be COMPLETED or FAILED".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let payment = Payment::find_by_id(payment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Payment {} not found", payment_id))
            })?;

        if payment.payment_status.is_terminal() {
            return Err(ServiceError::Conflict(format!(
                "Payment is already {}",
                payment.payment_status.label()
            )));
        }

        let order = Order::find_by_id(payment.order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", payment.order_id))
            })?;
        if order.order_status != OrderStatus::Pending {
            return Err(ServiceError::Conflict(format!(
                "Order is {}, not awaiting settlement",
                order.order_status.label()
            )));
        }

        let mut active: payment::ActiveModel = payment.into();
        active.payment_status = Set(outcome);
        let payment = active.update(&txn).await?;

        let new_order_status = match outcome {
            PaymentStatus::Completed => OrderStatus::Completed,
            _ => OrderStatus::Failed,
        };
        let old_order_status = order.order_status;
        let version = order.version + 1;
        let mut active_order: order::ActiveModel = order.into();
        active_order.order_status = Set(new_order_status);
        active_order.version = Set(version);
        let order = active_order.update(&txn).await?;

        audit::record(
            &txn,
            "payment",
            payment.id,
            "settled",
            Some(serde_json::json!({ "outcome": outcome.label() })),
        )
        .await?;
        audit::record(
            &txn,
            "order",
            order.id,
            "status_changed",
            Some(serde_json::json!({
                "from": old_order_status.label(),
                "to": new_order_status.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        info!(payment_id = %payment.id, outcome = outcome.label(), "payment settled");
        self.event_sender
            .send_or_log(Event::PaymentSettled {
                payment_id: payment.id,
                status: outcome,
            })
            .await;
        self.event_sender
            .send_or_log(Event::OrderStatusChanged {
                order_id: order.id,
                old_status: old_order_status,
                new_status: new_order_status,
            })
            .await;

        Ok(payment)
    }

    #[instrument(skip(self))]
    pub async fn get_payment(&self, payment_id: Uuid) -> Result<PaymentModel, ServiceError> {
        Payment::find_by_id(payment_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Payment {} not found", payment_id)))
    }

    #[instrument(skip(self))]
    pub async fn get_payment_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<PaymentModel, ServiceError> {
        Payment::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No payment recorded for order {}", order_id))
            })
    }
}
