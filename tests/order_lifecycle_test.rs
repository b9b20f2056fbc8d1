mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use forkflow_api::audit;
use forkflow_api::entities::{
    DeliveryStatus, OrderModel, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
};
use forkflow_api::errors::ServiceError;
use forkflow_api::services::carts::AddItemInput;
use forkflow_api::services::checkout::CheckoutInput;
use forkflow_api::services::payments::RecordPaymentInput;

use common::TestApp;

async fn place_order(app: &TestApp, order_type: OrderType) -> OrderModel {
    let user = common::seed_user(app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(app, restaurant.id, "Ramen", dec!(12.50)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    app.services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 2,
            },
        )
        .await
        .unwrap();

    app.services
        .checkout
        .checkout(
            cart.id,
            CheckoutInput {
                order_type,
                delivery_address: "34 Hungry Street".to_string(),
            },
        )
        .await
        .unwrap()
}

async fn settled_order(app: &TestApp) -> OrderModel {
    let order = place_order(app, OrderType::Delivery).await;
    let payment = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(25.00),
        })
        .await
        .unwrap();
    app.services
        .payments
        .settle(payment.id, PaymentStatus::Completed)
        .await
        .unwrap();
    app.services.orders.get_order(order.id).await.unwrap()
}

#[tokio::test]
async fn payment_amount_must_match_order_total() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;

    let err = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(20.00),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn only_one_payment_per_order() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;

    app.services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Cash,
            amount: dec!(25.00),
        })
        .await
        .unwrap();

    let err = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(25.00),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn settlement_cascades_to_the_order_and_is_final() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;
    let payment = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Bkash,
            amount: dec!(25.00),
        })
        .await
        .unwrap();
    assert_eq!(payment.payment_status, PaymentStatus::Pending);

    let payment = app
        .services
        .payments
        .settle(payment.id, PaymentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(payment.payment_status, PaymentStatus::Completed);

    let order = app.services.orders.get_order(order.id).await.unwrap();
    assert_eq!(order.order_status, OrderStatus::Completed);

    let err = app
        .services
        .payments
        .settle(payment.id, PaymentStatus::Failed)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn failed_settlement_fails_the_order() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;
    let payment = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(25.00),
        })
        .await
        .unwrap();

    app.services
        .payments
        .settle(payment.id, PaymentStatus::Failed)
        .await
        .unwrap();

    let order = app.services.orders.get_order(order.id).await.unwrap();
    assert_eq!(order.order_status, OrderStatus::Failed);
}

#[tokio::test]
async fn settle_rejects_a_pending_outcome() {
    let app = common::setup().await;
    let err = app
        .services
        .payments
        .settle(Uuid::new_v4(), PaymentStatus::Pending)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn pending_order_can_be_cancelled_settled_cannot() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;

    let cancelled = app.services.orders.cancel_order(order.id).await.unwrap();
    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert_eq!(cancelled.delivery_status, DeliveryStatus::Cancelled);

    // A cancelled order cannot take a payment.
    let err = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(25.00),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn settled_order_cannot_be_cancelled() {
    let app = common::setup().await;
    let order = settled_order(&app).await;

    let err = app.services.orders.cancel_order(order.id).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn delivery_progression_happy_path() {
    let app = common::setup().await;
    let order = settled_order(&app).await;
    let agent = common::seed_user(&app, "Des", "Patch", "agent@example.com").await;

    let order = app
        .services
        .orders
        .assign_delivery_agent(order.id, agent.id)
        .await
        .unwrap();
    assert_eq!(order.delivery_agent_id, Some(agent.id));

    let order = app
        .services
        .orders
        .mark_out_for_delivery(order.id)
        .await
        .unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::OutForDelivery);

    let order = app.services.orders.mark_delivered(order.id).await.unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::Delivered);

    // Delivered is terminal.
    let err = app
        .services
        .orders
        .mark_out_for_delivery(order.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn dispatch_requires_settlement_and_an_agent() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Delivery).await;

    // Unpaid order cannot be dispatched.
    let err = app
        .services
        .orders
        .mark_out_for_delivery(order.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let payment = app
        .services
        .payments
        .record_payment(RecordPaymentInput {
            order_id: order.id,
            payment_method: PaymentMethod::Card,
            amount: dec!(25.00),
        })
        .await
        .unwrap();
    app.services
        .payments
        .settle(payment.id, PaymentStatus::Completed)
        .await
        .unwrap();

    // Settled but no agent yet.
    let err = app
        .services
        .orders
        .mark_out_for_delivery(order.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn takeaway_orders_take_no_agent() {
    let app = common::setup().await;
    let order = place_order(&app, OrderType::Takeaway).await;
    let agent = common::seed_user(&app, "Des", "Patch", "agent@example.com").await;

    let err = app
        .services
        .orders
        .assign_delivery_agent(order.id, agent.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidOperation(_));
}

#[tokio::test]
async fn order_history_is_audited() {
    let app = common::setup().await;
    let order = settled_order(&app).await;

    let trail = audit::trail_for(&*app.db, "order", order.id).await.unwrap();
    let actions: Vec<&str> = trail.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["placed", "status_changed"]);
}
