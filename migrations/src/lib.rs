pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_restaurant_tables;
mod m20250301_000003_create_menu_tables;
mod m20250301_000004_create_cart_tables;
mod m20250301_000005_create_order_tables;
mod m20250301_000006_create_payments_table;
mod m20250301_000007_create_feedback_table;
mod m20250301_000008_create_audit_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_restaurant_tables::Migration),
            Box::new(m20250301_000003_create_menu_tables::Migration),
            Box::new(m20250301_000004_create_cart_tables::Migration),
            Box::new(m20250301_000005_create_order_tables::Migration),
            Box::new(m20250301_000006_create_payments_table::Migration),
            Box::new(m20250301_000007_create_feedback_table::Migration),
            Box::new(m20250301_000008_create_audit_log_table::Migration),
        ]
    }
}
