//! Append-only audit trail.
//!
//! Every state change in the order domain writes one row here, inside
//! the same transaction as the change itself. Rows are keyed by entity
//! type and id and are never updated or deleted.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set};
use uuid::Uuid;

use crate::entities::audit_log;
use crate::errors::ServiceError;

/// Records one audit entry on the given connection. Callers pass their
/// open transaction so the entry commits or rolls back with the change.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    entity_type: &str,
    entity_id: Uuid,
    action: &str,
    detail: Option<serde_json::Value>,
) -> Result<(), ServiceError> {
    let entry = audit_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(entity_id),
        action: Set(action.to_string()),
        detail: Set(detail),
        recorded_at: Set(Utc::now()),
    };

    entry.insert(conn).await?;
    Ok(())
}

/// Fetches the trail for one entity, oldest first.
pub async fn trail_for<C: ConnectionTrait>(
    conn: &C,
    entity_type: &str,
    entity_id: Uuid,
) -> Result<Vec<audit_log::Model>, ServiceError> {
    let entries = audit_log::Entity::find()
        .filter(audit_log::Column::EntityType.eq(entity_type))
        .filter(audit_log::Column::EntityId.eq(entity_id))
        .order_by_asc(audit_log::Column::RecordedAt)
        .all(conn)
        .await?;

    Ok(entries)
}
