use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    db::DbPool,
    dto::properties::PropertyList,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Property,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
};

/// Membership state of a (user, property) pair after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Favorited,
    NotFavorited,
}

/// Flip membership for one (user, property) pair.
///
/// The whole flip runs in one transaction and takes a pg advisory lock keyed
/// on the pair, so concurrent toggles serialize instead of racing the
/// check-then-write. The composite unique index on favorites backstops the
/// insert either way.
pub async fn toggle_favorite(
    pool: &DbPool,
    user: &AuthUser,
    property_id: Uuid,
) -> AppResult<FavoriteState> {
    let mut tx = pool.begin().await?;

    let property_exists: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&mut *tx)
            .await?;

    if property_exists.is_none() {
        return Err(AppError::NotFound);
    }

    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text || ':' || $2::text, 0))")
        .bind(user.user_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

    let removed = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
        .bind(user.user_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

    let state = if removed.rows_affected() == 0 {
        sqlx::query(
            r#"
            INSERT INTO favorites (id, user_id, property_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, property_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;
        FavoriteState::Favorited
    } else {
        FavoriteState::NotFavorited
    };

    tx.commit().await?;

    audit::record(
        pool,
        user.user_id,
        AuditAction::FavoriteToggle,
        Some(serde_json::json!({
            "property_id": property_id,
            "favorited": state == FavoriteState::Favorited,
        })),
    )
    .await;

    Ok(state)
}

pub async fn list_favorites(
    pool: &DbPool,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<PropertyList>> {
    let (page, per_page, offset) = pagination.window();
    let properties = sqlx::query_as::<_, Property>(
        r#"
        SELECT p.*
        FROM favorites f
        JOIN properties p ON p.id = f.property_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(pool)
        .await?;

    let data = PropertyList { items: properties };
    Ok(ApiResponse::paged(
        "Favorites",
        data,
        Meta::paged(page, per_page, total.0),
    ))
}
