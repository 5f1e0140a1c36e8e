use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use estate_portal::{config::AppConfig, routes::create_router, state::AppState};
use sea_orm::DatabaseConnection;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

// Guard checks never touch the database for anonymous callers: the session
// cookie is missing, so the extractor rejects before any query. A lazy pool
// and a disconnected ORM handle are enough to build the router.
fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/estate_portal_unused")
        .expect("lazy pool");
    AppState {
        pool,
        orm: DatabaseConnection::Disconnected,
        config: AppConfig {
            database_url: "postgres://localhost/estate_portal_unused".into(),
            host: "127.0.0.1".into(),
            port: 0,
            session_ttl_hours: 24,
        },
    }
}

async fn get_status_and_location(path: &str, method: &str) -> (StatusCode, Option<String>) {
    let app = create_router().with_state(test_state());
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

#[tokio::test]
async fn root_redirects_to_login() {
    let (status, location) = get_status_and_location("/", "GET").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn guarded_routes_redirect_anonymous_callers_to_login() {
    let toggle_path = format!("/toggle-favorite/{}", Uuid::new_v4());
    let guarded = [
        ("/properties", "GET"),
        ("/add-property", "GET"),
        ("/favorites", "GET"),
        ("/logout", "GET"),
        (toggle_path.as_str(), "POST"),
    ];

    for (path, method) in guarded {
        let (status, location) = get_status_and_location(path, method).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "route {method} {path}");
        assert_eq!(location.as_deref(), Some("/login"), "route {method} {path}");
    }
}

#[tokio::test]
async fn login_and_register_forms_are_public() {
    for path in ["/login", "/register"] {
        let (status, _) = get_status_and_location(path, "GET").await;
        assert_eq!(status, StatusCode::OK, "route GET {path}");
    }
}
