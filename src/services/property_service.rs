use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::properties::{NewProperty, PropertyList},
    entity::properties::{ActiveModel, Column, Entity as Properties, Model as PropertyModel},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Property,
    response::{ApiResponse, Meta},
    routes::params::PropertyQuery,
    state::AppState,
};

pub async fn list_properties(
    state: &AppState,
    query: PropertyQuery,
) -> AppResult<ApiResponse<PropertyList>> {
    let (page, per_page, offset) = query.pagination.window();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Title).ilike(pattern.clone()))
                .add(Expr::col(Column::Location).ilike(pattern)),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let finder = Properties::find().filter(condition).order_by(
        query.sort_by.unwrap_or_default().column(),
        query.sort_order.unwrap_or_default().order(),
    );

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(per_page as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(property_from_entity)
        .collect();

    let data = PropertyList { items };
    Ok(ApiResponse::paged(
        "Properties",
        data,
        Meta::paged(page, per_page, total),
    ))
}

/// Persist a new listing. Ownership always comes from the authenticated
/// caller, never from the form.
pub async fn create_property(
    state: &AppState,
    user: &AuthUser,
    listing: NewProperty,
) -> AppResult<Property> {
    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        title: Set(listing.title),
        price: Set(listing.price),
        location: Set(listing.location),
        user_id: Set(user.user_id),
        created_at: NotSet,
    };
    let property = active.insert(&state.orm).await?;

    audit::record(
        &state.pool,
        user.user_id,
        AuditAction::PropertyCreate,
        Some(serde_json::json!({ "property_id": property.id })),
    )
    .await;

    Ok(property_from_entity(property))
}

fn property_from_entity(model: PropertyModel) -> Property {
    Property {
        id: model.id,
        title: model.title,
        price: model.price,
        location: model.location,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
