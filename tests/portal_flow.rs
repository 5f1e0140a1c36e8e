use estate_portal::{
    config::AppConfig,
    db::{apply_migrations, create_orm_conn, create_pool},
    dto::{
        auth::{LoginForm, RegisterForm},
        properties::NewPropertyForm,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{Pagination, PropertyQuery},
    services::{
        auth_service,
        favorite_service::{self, FavoriteState},
        property_service,
    },
    state::AppState,
};
use sqlx::Row;
use uuid::Uuid;

// Integration flow: register -> login -> add listing -> browse -> favorite
// toggling, plus the duplicate-email, credential-uniformity, and concurrent
// toggle properties. One test so the table truncation never races itself.
#[tokio::test]
async fn register_list_and_favorite_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let state = setup_state(&database_url).await?;

    // Register Alice, then prove the same credentials authenticate.
    let alice =
        auth_service::register_user(&state.pool, register_form("Alice", "a@x.com", "pw123"))
            .await?;
    let authed = auth_service::authenticate(&state.pool, login_form("a@x.com", "pw123")).await?;
    assert_eq!(authed.id, alice.id);

    // A second registration with the same email is refused by the constraint
    // and no extra row appears.
    let dup =
        auth_service::register_user(&state.pool, register_form("Alice2", "a@x.com", "other")).await;
    assert!(matches!(dup, Err(AppError::DuplicateEmail)));
    let user_count: i64 = sqlx::query("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await?
        .get(0);
    assert_eq!(user_count, 1);

    // Wrong password and unknown email fail with the same error kind.
    let wrong_pw = auth_service::authenticate(&state.pool, login_form("a@x.com", "nope")).await;
    let no_user = auth_service::authenticate(&state.pool, login_form("ghost@x.com", "pw123")).await;
    assert!(matches!(wrong_pw, Err(AppError::InvalidCredentials)));
    assert!(matches!(no_user, Err(AppError::InvalidCredentials)));

    // Establish a session the way the login handler does.
    let session = auth_service::establish_session(&state.pool, alice.id, 24).await?;
    let auth_user = AuthUser {
        user_id: alice.id,
        name: alice.name.clone(),
        email: alice.email.clone(),
        session_token: session.token,
    };

    // Add a listing and find it in the browse list.
    let listing = NewPropertyForm {
        title: "Loft".into(),
        price: "1000".into(),
        location: "NYC".into(),
    }
    .validate()?;
    let loft = property_service::create_property(&state, &auth_user, listing).await?;
    assert_eq!(loft.user_id, alice.id);
    assert_eq!(loft.price, 1000);

    let listed = property_service::list_properties(&state, all_properties_query()).await?;
    let items = listed.data.unwrap().items;
    assert!(items.iter().any(|p| p.title == "Loft"));

    // Favorite round trip: once -> favorited, twice -> back to empty.
    let first = favorite_service::toggle_favorite(&state.pool, &auth_user, loft.id).await?;
    assert_eq!(first, FavoriteState::Favorited);
    let favorites =
        favorite_service::list_favorites(&state.pool, &auth_user, default_pagination()).await?;
    assert!(
        favorites
            .data
            .unwrap()
            .items
            .iter()
            .any(|p| p.title == "Loft")
    );

    let second = favorite_service::toggle_favorite(&state.pool, &auth_user, loft.id).await?;
    assert_eq!(second, FavoriteState::NotFavorited);
    let favorites =
        favorite_service::list_favorites(&state.pool, &auth_user, default_pagination()).await?;
    assert!(favorites.data.unwrap().items.is_empty());

    // Unknown property id is a NotFound, not a silent no-op.
    let missing = favorite_service::toggle_favorite(&state.pool, &auth_user, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // Concurrent toggles on the same pair must serialize: an odd number of
    // flips from empty leaves exactly one membership row, an even number
    // leaves none, and duplicates never appear.
    for (toggles, expected_rows) in [(5_usize, 1_i64), (4, 0)] {
        let mut tasks = Vec::new();
        for _ in 0..toggles {
            let pool = state.pool.clone();
            let user = auth_user.clone();
            let property_id = loft.id;
            tasks.push(tokio::spawn(async move {
                favorite_service::toggle_favorite(&pool, &user, property_id).await
            }));
        }
        for task in tasks {
            task.await??;
        }

        let rows: i64 =
            sqlx::query("SELECT COUNT(*) FROM favorites WHERE user_id = $1 AND property_id = $2")
                .bind(alice.id)
                .bind(loft.id)
                .fetch_one(&state.pool)
                .await?
                .get(0);
        assert_eq!(rows, expected_rows, "after {toggles} concurrent toggles");

        // Reset to the empty state for the next round.
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
            .bind(alice.id)
            .bind(loft.id)
            .execute(&state.pool)
            .await?;
    }

    // Logout revokes the session row.
    auth_service::revoke_session(&state.pool, session.token).await?;
    let session_count: i64 = sqlx::query("SELECT COUNT(*) FROM sessions WHERE token = $1")
        .bind(session.token)
        .fetch_one(&state.pool)
        .await?
        .get(0);
    assert_eq!(session_count, 0);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    apply_migrations(&pool).await?;

    // Clean tables between runs.
    sqlx::query(
        "TRUNCATE TABLE favorites, sessions, audit_logs, reviews, inquiries, properties, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState {
        pool,
        orm,
        config: AppConfig {
            database_url: database_url.to_string(),
            host: "127.0.0.1".into(),
            port: 0,
            session_ttl_hours: 24,
        },
    })
}

fn register_form(name: &str, email: &str, password: &str) -> RegisterForm {
    RegisterForm {
        name: name.into(),
        email: email.into(),
        password: password.into(),
    }
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.into(),
        password: password.into(),
    }
}

fn default_pagination() -> Pagination {
    Pagination {
        page: None,
        per_page: None,
    }
}

fn all_properties_query() -> PropertyQuery {
    PropertyQuery {
        pagination: default_pagination(),
        q: None,
        min_price: None,
        max_price: None,
        sort_by: None,
        sort_order: None,
    }
}
