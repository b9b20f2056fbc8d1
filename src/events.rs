use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{DeliveryStatus, OrderStatus, PaymentStatus};

/// Events emitted by the services after a successful state change.
/// Delivery is best-effort; the transactional write is the source of
/// truth and the audit log carries the durable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Account events
    UserRegistered(Uuid),
    UserStatusChanged(Uuid),

    // Catalog events
    RestaurantCreated(Uuid),
    MenuItemCreated(Uuid),
    MenuItemAvailabilityChanged { menu_item_id: Uuid, available: bool },

    // Cart events
    CartCreated(Uuid),
    CartItemAdded { cart_id: Uuid, menu_item_id: Uuid },
    CartItemRemoved { cart_id: Uuid, item_id: Uuid },
    CartCleared(Uuid),

    // Order events
    CheckoutCompleted { cart_id: Uuid, order_id: Uuid },
    OrderCancelled(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: OrderStatus,
        new_status: OrderStatus,
    },
    DeliveryStatusChanged {
        order_id: Uuid,
        old_status: DeliveryStatus,
        new_status: DeliveryStatus,
    },

    // Payment events
    PaymentRecorded(Uuid),
    PaymentSettled {
        payment_id: Uuid,
        status: PaymentStatus,
    },

    // Feedback events
    FeedbackSubmitted(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, failing if the channel is closed or full.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing. Used on paths where
    /// the state change has already committed.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event.clone()).await {
            warn!(?event, error = %e, "Failed to publish event");
        }
    }
}

/// Consumer loop for the in-process event channel. Runs until every
/// sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::CheckoutCompleted { cart_id, order_id } => {
                info!(%cart_id, %order_id, "checkout completed");
            }
            Event::PaymentSettled { payment_id, status } => {
                info!(%payment_id, status = status.label(), "payment settled");
            }
            Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            } => {
                info!(
                    %order_id,
                    from = old_status.label(),
                    to = new_status.label(),
                    "order status changed"
                );
            }
            other => {
                info!(event = ?other, "event received");
            }
        }
    }

    info!("Event channel closed, stopping event processing loop");
}
