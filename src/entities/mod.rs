pub mod audit_log;
pub mod cart;
pub mod cart_item;
pub mod customer_feedback;
pub mod menu_category;
pub mod menu_item;
pub mod modifier;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod restaurant;
pub mod restaurant_address;
pub mod restaurant_staff;
pub mod user;

// Re-export entities
pub use audit_log::{Entity as AuditLog, Model as AuditLogModel};
pub use cart::{Entity as Cart, Model as CartModel};
pub use cart_item::{Entity as CartItem, Model as CartItemModel};
pub use customer_feedback::{Entity as CustomerFeedback, Model as CustomerFeedbackModel};
pub use menu_category::{Entity as MenuCategory, Model as MenuCategoryModel};
pub use menu_item::{Entity as MenuItem, Model as MenuItemModel};
pub use modifier::{Entity as Modifier, Model as ModifierModel};
pub use order::{DeliveryStatus, Entity as Order, Model as OrderModel, OrderStatus, OrderType};
pub use order_item::{Entity as OrderItem, Model as OrderItemModel};
pub use payment::{Entity as Payment, Model as PaymentModel, PaymentMethod, PaymentStatus};
pub use restaurant::{Entity as Restaurant, Model as RestaurantModel};
pub use restaurant_address::{Entity as RestaurantAddress, Model as RestaurantAddressModel};
pub use restaurant_staff::{Entity as RestaurantStaff, Model as RestaurantStaffModel, StaffRole};
pub use user::{AccountStatus, Entity as User, Model as UserModel};
