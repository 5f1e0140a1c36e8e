use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginForm, RegisterForm},
        properties::{NewPropertyForm, PropertyList},
    },
    models::{Favorite, Inquiry, Property, Review, User},
    response::{ApiResponse, Meta},
    routes::{auth, favorites, health, params, properties},
    session::SESSION_COOKIE,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register_form,
        auth::register,
        auth::login_form,
        auth::login,
        auth::logout,
        properties::list_properties,
        properties::add_property_form,
        properties::add_property,
        favorites::toggle_favorite,
        favorites::list_favorites
    ),
    components(
        schemas(
            User,
            Property,
            Favorite,
            Review,
            Inquiry,
            RegisterForm,
            LoginForm,
            NewPropertyForm,
            PropertyList,
            params::Pagination,
            params::PropertyQuery,
            Meta,
            ApiResponse<Property>,
            ApiResponse<PropertyList>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login, logout"),
        (name = "Properties", description = "Listing browse and create"),
        (name = "Favorites", description = "Favorite toggling and listing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
