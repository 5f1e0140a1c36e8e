use serde::Serialize;
use utoipa::ToSchema;

/// Pagination facts carried by list bodies; absent everywhere else.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn paged(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }
}

/// Envelope shared by every JSON body the portal returns.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paged(message: impl Into<String>, data: T, meta: Meta) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}
