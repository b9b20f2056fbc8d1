use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities;
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ForkFlow API",
        description = "Restaurant ordering backend: accounts, menus, carts, orders, payments, and feedback",
        version = env!("CARGO_PKG_VERSION"),
    ),
    paths(
        handlers::health::health_check,
        handlers::users::register_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::get_user_by_slug,
        handlers::users::activate_user,
        handlers::users::deactivate_user,
        handlers::users::remove_user,
        handlers::restaurants::create_restaurant,
        handlers::restaurants::list_restaurants,
        handlers::restaurants::get_restaurant,
        handlers::restaurants::get_restaurant_by_slug,
        handlers::restaurants::activate_restaurant,
        handlers::restaurants::deactivate_restaurant,
        handlers::restaurants::add_address,
        handlers::restaurants::list_addresses,
        handlers::restaurants::add_staff,
        handlers::restaurants::list_staff,
        handlers::restaurants::get_menu,
        handlers::restaurants::list_orders,
        handlers::restaurants::list_feedback,
        handlers::menus::create_category,
        handlers::menus::create_menu_item,
        handlers::menus::get_menu_item,
        handlers::menus::set_availability,
        handlers::menus::update_price,
        handlers::menus::create_modifier,
        handlers::menus::list_modifiers,
        handlers::carts::get_or_create_cart,
        handlers::carts::get_cart_for_user,
        handlers::carts::get_cart,
        handlers::carts::add_item,
        handlers::carts::remove_item,
        handlers::carts::clear_cart,
        handlers::carts::checkout,
        handlers::orders::get_order,
        handlers::orders::list_orders_for_user,
        handlers::orders::cancel_order,
        handlers::orders::assign_agent,
        handlers::orders::dispatch_order,
        handlers::orders::deliver_order,
        handlers::payments::record_payment,
        handlers::payments::settle_payment,
        handlers::payments::get_payment,
        handlers::payments::get_payment_for_order,
        handlers::feedback::submit_feedback,
        handlers::feedback::get_feedback,
    ),
    components(schemas(
        ErrorResponse,
        entities::UserModel,
        entities::AccountStatus,
        entities::RestaurantModel,
        entities::RestaurantAddressModel,
        entities::RestaurantStaffModel,
        entities::StaffRole,
        entities::MenuCategoryModel,
        entities::MenuItemModel,
        entities::ModifierModel,
        entities::CartModel,
        entities::CartItemModel,
        entities::OrderModel,
        entities::OrderItemModel,
        entities::OrderStatus,
        entities::DeliveryStatus,
        entities::OrderType,
        entities::PaymentModel,
        entities::PaymentMethod,
        entities::PaymentStatus,
        entities::CustomerFeedbackModel,
        services::users::RegisterUserInput,
        services::restaurants::CreateRestaurantInput,
        services::restaurants::AddAddressInput,
        services::restaurants::AddStaffInput,
        services::menus::CreateCategoryInput,
        services::menus::CreateMenuItemInput,
        services::menus::CreateModifierInput,
        services::menus::MenuSection,
        services::carts::AddItemInput,
        services::carts::CartWithItems,
        services::checkout::CheckoutInput,
        services::orders::OrderWithItems,
        services::payments::RecordPaymentInput,
        services::feedback::SubmitFeedbackInput,
        handlers::menus::AvailabilityBody,
        handlers::menus::PriceBody,
        handlers::orders::AssignAgentBody,
        handlers::payments::SettleBody,
        handlers::health::HealthResponse,
        handlers::common::PaginationMeta,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "Account registration and lifecycle"),
        (name = "restaurants", description = "Restaurant registry, staff, and addresses"),
        (name = "menu", description = "Menu categories, items, and modifiers"),
        (name = "carts", description = "Cart staging and checkout"),
        (name = "orders", description = "Order lifecycle and delivery"),
        (name = "payments", description = "Payment capture and settlement"),
        (name = "feedback", description = "Customer feedback"),
    )
)]
pub struct ApiDoc;

/// Swagger UI plus the raw OpenAPI document.
pub fn swagger_router() -> Router {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
