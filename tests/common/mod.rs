#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::mpsc;
use uuid::Uuid;

use forkflow_api::db::run_migrations;
use forkflow_api::entities::{MenuItemModel, RestaurantModel, UserModel};
use forkflow_api::events::{Event, EventSender};
use forkflow_api::handlers::AppServices;
use forkflow_api::services::menus::{CreateCategoryInput, CreateMenuItemInput};
use forkflow_api::services::restaurants::CreateRestaurantInput;
use forkflow_api::services::users::RegisterUserInput;

/// Everything a test needs: a migrated in-memory database, the service
/// container, and the receiving end of the event channel.
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
    pub events: mpsc::Receiver<Event>,
}

/// One connection only: each pooled connection to `sqlite::memory:`
/// would otherwise see its own empty database.
pub async fn setup() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory database");
    run_migrations(&db).await.expect("migrations failed");

    let db = Arc::new(db);
    let (tx, rx) = mpsc::channel(256);
    let services = AppServices::new(db.clone(), Arc::new(EventSender::new(tx)));

    TestApp {
        db,
        services,
        events: rx,
    }
}

pub async fn seed_user(app: &TestApp, first: &str, last: &str, email: &str) -> UserModel {
    app.services
        .users
        .register(RegisterUserInput {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: None,
            address: Some("12 Test Lane".to_string()),
        })
        .await
        .expect("failed to seed user")
}

pub async fn seed_restaurant(app: &TestApp, name: &str, tax_number: &str) -> RestaurantModel {
    app.services
        .restaurants
        .create_restaurant(CreateRestaurantInput {
            name: name.to_string(),
            ceo_name: "Pat Owner".to_string(),
            tax_number: tax_number.to_string(),
            registration_no: format!("REG-{}", tax_number),
            contact_number: None,
            whatsapp_no: None,
            website_url: None,
            facebook_url: None,
            instagram_url: None,
            summary: None,
            description: None,
            number_of_employees: None,
            opening_time: None,
            closing_time: None,
            delivery: true,
            takeaway: true,
        })
        .await
        .expect("failed to seed restaurant")
}

/// Creates a category on the restaurant and one available item in it.
/// Prices in tests are binary-exact so they survive the REAL column
/// sqlite stores decimals in.
pub async fn seed_menu_item(
    app: &TestApp,
    restaurant_id: Uuid,
    name: &str,
    price: Decimal,
) -> MenuItemModel {
    let category = app
        .services
        .menus
        .create_category(CreateCategoryInput {
            restaurant_id,
            name: format!("{} Section", name),
        })
        .await
        .expect("failed to seed category");

    app.services
        .menus
        .create_menu_item(CreateMenuItemInput {
            menu_category_id: category.id,
            name: name.to_string(),
            price,
            description: None,
            is_available: true,
        })
        .await
        .expect("failed to seed menu item")
}
