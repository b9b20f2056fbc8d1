pub mod carts;
pub mod common;
pub mod feedback;
pub mod health;
pub mod menus;
pub mod orders;
pub mod payments;
pub mod restaurants;
pub mod users;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services;

pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<services::UserService>,
    pub restaurants: Arc<services::RestaurantService>,
    pub menus: Arc<services::MenuService>,
    pub carts: Arc<services::CartService>,
    pub checkout: Arc<services::CheckoutService>,
    pub orders: Arc<services::OrderService>,
    pub payments: Arc<services::PaymentService>,
    pub feedback: Arc<services::FeedbackService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            users: Arc::new(services::UserService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            restaurants: Arc::new(services::RestaurantService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            menus: Arc::new(services::MenuService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            carts: Arc::new(services::CartService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            checkout: Arc::new(services::CheckoutService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            orders: Arc::new(services::OrderService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            payments: Arc::new(services::PaymentService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            feedback: Arc::new(services::FeedbackService::new(db_pool, event_sender)),
        }
    }
}
