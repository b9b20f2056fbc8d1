//! Service layer: one service per aggregate, each owning the writes
//! and invariants for its slice of the domain. Handlers stay thin and
//! delegate here.

pub mod carts;
pub mod checkout;
pub mod feedback;
pub mod menus;
pub mod orders;
pub mod payments;
pub mod restaurants;
pub mod users;

pub use carts::CartService;
pub use checkout::CheckoutService;
pub use feedback::FeedbackService;
pub use menus::MenuService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use restaurants::RestaurantService;
pub use users::UserService;
