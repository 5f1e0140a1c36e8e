use serde_json::Value;
use uuid::Uuid;

use crate::db::DbPool;

/// Domain events that leave a trail row.
#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    Register,
    Login,
    Logout,
    PropertyCreate,
    FavoriteToggle,
}

impl AuditAction {
    fn as_str(self) -> &'static str {
        match self {
            AuditAction::Register => "user_register",
            AuditAction::Login => "user_login",
            AuditAction::Logout => "user_logout",
            AuditAction::PropertyCreate => "property_create",
            AuditAction::FavoriteToggle => "favorite_toggle",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            AuditAction::Register | AuditAction::Login => "users",
            AuditAction::Logout => "sessions",
            AuditAction::PropertyCreate => "properties",
            AuditAction::FavoriteToggle => "favorites",
        }
    }
}

/// Write one audit row. The trail is best-effort: a failed insert is logged
/// and never bubbles into the request that triggered it.
pub async fn record(pool: &DbPool, user_id: Uuid, action: AuditAction, metadata: Option<Value>) {
    let outcome = sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(metadata)
    .execute(pool)
    .await;

    if let Err(err) = outcome {
        tracing::warn!(error = %err, action = action.as_str(), "audit log failed");
    }
}
