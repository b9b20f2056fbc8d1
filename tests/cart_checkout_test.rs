mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use sea_orm::{EntityTrait, PaginatorTrait};

use forkflow_api::entities::{DeliveryStatus, Order, OrderStatus, OrderType};
use forkflow_api::errors::ServiceError;
use forkflow_api::services::carts::AddItemInput;
use forkflow_api::services::checkout::CheckoutInput;
use forkflow_api::services::menus::CreateModifierInput;

fn delivery_checkout() -> CheckoutInput {
    CheckoutInput {
        order_type: OrderType::Delivery,
        delivery_address: "34 Hungry Street".to_string(),
    }
}

#[tokio::test]
async fn cart_is_created_once_per_user() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;

    let first = app.services.carts.get_or_create_cart(user.id).await.unwrap();
    let second = app.services.carts.get_or_create_cart(user.id).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn add_item_snapshots_price_and_merges_lines() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    let view = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].price, dec!(12.50));

    // Reprice the catalog; the cart line must keep its snapshot.
    app.services
        .menus
        .update_item_price(item.id, dec!(99.00))
        .await
        .unwrap();

    let view = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(view.items.len(), 1, "same line should merge");
    assert_eq!(view.items[0].quantity, 2);
    assert_eq!(view.items[0].price, dec!(12.50));
    assert_eq!(view.total(), dec!(25.00));
}

#[tokio::test]
async fn modifier_price_joins_the_snapshot() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
    let modifier = app
        .services
        .menus
        .create_modifier(CreateModifierInput {
            menu_item_id: item.id,
            name: "Extra Egg".to_string(),
            price: dec!(2.00),
        })
        .await
        .unwrap();
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    let view = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: Some(modifier.id),
                quantity: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(view.items[0].price, dec!(14.50));
}

#[tokio::test]
async fn unavailable_items_and_bad_quantities_are_rejected() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    let err = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 0,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    app.services
        .menus
        .set_item_availability(item.id, false)
        .await
        .unwrap();

    let err = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 1,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn checkout_places_order_and_consumes_cart() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
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

    let order = app
        .services
        .checkout
        .checkout(cart.id, delivery_checkout())
        .await
        .unwrap();

    assert_eq!(order.user_id, user.id);
    assert_eq!(order.restaurant_id, restaurant.id);
    assert_eq!(order.total_price, dec!(25.00));
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.delivery_status, DeliveryStatus::Pending);

    let with_items = app
        .services
        .orders
        .get_order_with_items(order.id)
        .await
        .unwrap();
    assert_eq!(with_items.items.len(), 1);
    assert_eq!(with_items.items[0].quantity, 2);
    assert_eq!(with_items.items[0].price, dec!(12.50));

    // The cart is gone; a second checkout has nothing to work with.
    let err = app.services.carts.get_cart(cart.id).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
    let err = app
        .services
        .checkout
        .checkout(cart.id, delivery_checkout())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn concurrent_checkouts_place_exactly_one_order() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    app.services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    // Race two checkouts on the same cart. The version-filtered delete
    // lets exactly one win; the loser sees the cart gone or moved on.
    let (first, second) = tokio::join!(
        app.services.checkout.checkout(cart.id, delivery_checkout()),
        app.services.checkout.checkout(cart.id, delivery_checkout()),
    );

    let (winner, loser) = match (first, second) {
        (Ok(order), Err(err)) | (Err(err), Ok(order)) => (order, err),
        (Ok(_), Ok(_)) => panic!("both checkouts succeeded"),
        (Err(a), Err(b)) => panic!("both checkouts failed: {a}, {b}"),
    };
    assert_eq!(winner.total_price, dec!(12.50));
    assert_matches!(
        loser,
        ServiceError::NotFound(_) | ServiceError::Conflict(_)
    );

    let orders = Order::find().count(&*app.db).await.unwrap();
    assert_eq!(orders, 1);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    let err = app
        .services
        .checkout
        .checkout(cart.id, delivery_checkout())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    // The failed checkout left the cart in place.
    let view = app.services.carts.get_cart(cart.id).await.unwrap();
    assert!(view.items.is_empty());
}

#[tokio::test]
async fn mixed_restaurant_cart_is_rejected() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let first = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let second = common::seed_restaurant(&app, "Other Place", "TAX-2").await;
    let ramen = common::seed_menu_item(&app, first.id, "Ramen", dec!(12.50)).await;
    let pizza = common::seed_menu_item(&app, second.id, "Pizza", dec!(8.00)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    for menu_item_id in [ramen.id, pizza.id] {
        app.services
            .carts
            .add_item(
                cart.id,
                AddItemInput {
                    menu_item_id,
                    modifier_id: None,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
    }

    let err = app
        .services
        .checkout
        .checkout(cart.id, delivery_checkout())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn remove_and_clear_update_the_cart() {
    let app = common::setup().await;
    let user = common::seed_user(&app, "Ada", "Lovelace", "ada@example.com").await;
    let restaurant = common::seed_restaurant(&app, "Testaurant", "TAX-1").await;
    let item = common::seed_menu_item(&app, restaurant.id, "Ramen", dec!(12.50)).await;
    let cart = app.services.carts.get_or_create_cart(user.id).await.unwrap();

    let view = app
        .services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let view = app
        .services
        .carts
        .remove_item(cart.id, view.items[0].id)
        .await
        .unwrap();
    assert!(view.items.is_empty());

    app.services
        .carts
        .add_item(
            cart.id,
            AddItemInput {
                menu_item_id: item.id,
                modifier_id: None,
                quantity: 3,
            },
        )
        .await
        .unwrap();
    let view = app.services.carts.clear_cart(cart.id).await.unwrap();
    assert!(view.items.is_empty());
}
