use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::audit;
use crate::entities::{user, AccountStatus, User, UserModel};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::slug::{dedupe_slug, slugify};

/// Account registration and lifecycle.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterUserInput {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Registers a new account. Email must be unique; the slug is
    /// derived from the full name and deduplicated with a numeric
    /// suffix.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterUserInput) -> Result<UserModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let existing = User::find()
            .filter(user::Column::Email.eq(input.email.clone()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Email {} is already registered",
                input.email
            )));
        }

        let base = slugify(&format!("{} {}", input.first_name, input.last_name));
        let taken: Vec<String> = User::find()
            .filter(user::Column::Slug.starts_with(base.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|u| u.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            slug: Set(slug),
            phone: Set(input.phone),
            email: Set(input.email),
            address: Set(input.address),
            status: Set(AccountStatus::Active),
            is_staff: Set(false),
            is_verified: Set(false),
            ..Default::default()
        };
        let user = user.insert(&txn).await?;

        audit::record(&txn, "user", user.id, "registered", None).await?;
        txn.commit().await?;

        info!(user_id = %user.id, "user registered");
        self.event_sender
            .send_or_log(Event::UserRegistered(user.id))
            .await;

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Uuid) -> Result<UserModel, ServiceError> {
        User::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_slug(&self, slug: &str) -> Result<UserModel, ServiceError> {
        User::find()
            .filter(user::Column::Slug.eq(slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", slug)))
    }

    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<UserModel>, u64), ServiceError> {
        let paginator = User::find().paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((users, total))
    }

    /// Reactivates a previously deactivated account.
    pub async fn activate(&self, user_id: Uuid) -> Result<UserModel, ServiceError> {
        self.set_status(user_id, AccountStatus::Active).await
    }

    /// Deactivates an account without destroying its history.
    pub async fn deactivate(&self, user_id: Uuid) -> Result<UserModel, ServiceError> {
        self.set_status(user_id, AccountStatus::Inactive).await
    }

    /// Soft-deletes an account. Removal is terminal.
    pub async fn remove(&self, user_id: Uuid) -> Result<UserModel, ServiceError> {
        self.set_status(user_id, AccountStatus::Removed).await
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        user_id: Uuid,
        status: AccountStatus,
    ) -> Result<UserModel, ServiceError> {
        let txn = self.db.begin().await?;

        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        if user.status == AccountStatus::Removed {
            return Err(ServiceError::Conflict(
                "Removed accounts cannot change status".to_string(),
            ));
        }
        if user.status == status {
            txn.commit().await?;
            return Ok(user);
        }

        let old = user.status;
        let mut active: user::ActiveModel = user.into();
        active.status = Set(status);
        let user = active.update(&txn).await?;

        audit::record(
            &txn,
            "user",
            user.id,
            "status_changed",
            Some(serde_json::json!({
                "from": old.label(),
                "to": status.label(),
            })),
        )
        .await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::UserStatusChanged(user.id))
            .await;

        Ok(user)
    }
}
