use estate_portal::{
    config::AppConfig,
    db::{apply_migrations, create_pool},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    apply_migrations(&pool).await?;

    let alice_id = ensure_user(&pool, "Alice", "alice@example.com", "alice123").await?;
    let bob_id = ensure_user(&pool, "Bob", "bob@example.com", "bob123").await?;
    seed_properties(&pool, alice_id, bob_id).await?;

    println!("Seed completed. Alice ID: {alice_id}, Bob ID: {bob_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    // DO UPDATE makes the upsert always return the row, new or existing.
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_properties(
    pool: &sqlx::PgPool,
    alice_id: Uuid,
    bob_id: Uuid,
) -> anyhow::Result<()> {
    let listings = vec![
        ("Sunny Loft", 1000_i64, "NYC", alice_id),
        ("Harbor Studio", 850, "Hamburg", alice_id),
        ("Garden Flat", 1200, "London", bob_id),
        ("Hillside Cabin", 600, "Oslo", bob_id),
    ];

    for (title, price, location, owner) in listings {
        sqlx::query(
            r#"
            INSERT INTO properties (id, title, price, location, user_id)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (
                SELECT 1 FROM properties WHERE title = $2 AND user_id = $5
            )
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(price)
        .bind(location)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    println!("Seeded properties");
    Ok(())
}
