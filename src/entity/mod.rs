pub mod audit_logs;
pub mod favorites;
pub mod inquiries;
pub mod properties;
pub mod reviews;
pub mod sessions;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use favorites::Entity as Favorites;
pub use inquiries::Entity as Inquiries;
pub use properties::Entity as Properties;
pub use reviews::Entity as Reviews;
pub use sessions::Entity as Sessions;
pub use users::Entity as Users;
