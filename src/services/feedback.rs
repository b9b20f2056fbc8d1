use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    customer_feedback, CustomerFeedback, CustomerFeedbackModel, MenuItem, Order, Restaurant, User,
};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::slug::{dedupe_slug, slugify};

/// Customer feedback on restaurants, menu items, and orders.
#[derive(Clone)]
pub struct FeedbackService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SubmitFeedbackInput {
    pub customer_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub menu_item_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
}

impl FeedbackService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Stores a feedback entry. Every referenced entity must exist; a
    /// rating, when present, is between 1 and 5.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id))]
    pub async fn submit_feedback(
        &self,
        input: SubmitFeedbackInput,
    ) -> Result<CustomerFeedbackModel, ServiceError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        User::find_by_id(input.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("User {} not found", input.customer_id))
            })?;
        if let Some(order_id) = input.order_id {
            Order::find_by_id(order_id)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;
        }
        if let Some(menu_item_id) = input.menu_item_id {
            MenuItem::find_by_id(menu_item_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Menu item {} not found", menu_item_id))
                })?;
        }
        if let Some(restaurant_id) = input.restaurant_id {
            Restaurant::find_by_id(restaurant_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Restaurant {} not found", restaurant_id))
                })?;
        }

        let base = slugify(&input.title);
        let taken: Vec<String> = CustomerFeedback::find()
            .filter(customer_feedback::Column::Slug.starts_with(base.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|f| f.slug)
            .collect();
        let slug = dedupe_slug(&base, &taken);

        let feedback = customer_feedback::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            slug: Set(slug),
            customer_id: Set(input.customer_id),
            menu_item_id: Set(input.menu_item_id),
            order_id: Set(input.order_id),
            restaurant_id: Set(input.restaurant_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            ..Default::default()
        };
        let feedback = feedback.insert(&txn).await?;

        txn.commit().await?;

        info!(feedback_id = %feedback.id, "feedback submitted");
        self.event_sender
            .send_or_log(Event::FeedbackSubmitted(feedback.id))
            .await;

        Ok(feedback)
    }

    #[instrument(skip(self))]
    pub async fn get_feedback(
        &self,
        feedback_id: Uuid,
    ) -> Result<CustomerFeedbackModel, ServiceError> {
        CustomerFeedback::find_by_id(feedback_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Feedback {} not found", feedback_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_feedback_for_restaurant(
        &self,
        restaurant_id: Uuid,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<CustomerFeedbackModel>, u64), ServiceError> {
        let paginator = CustomerFeedback::find()
            .filter(customer_feedback::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(customer_feedback::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let entries = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((entries, total))
    }
}
