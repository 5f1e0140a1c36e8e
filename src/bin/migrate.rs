use estate_portal::{
    config::AppConfig,
    db::{apply_migrations, create_pool},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    apply_migrations(&pool).await?;
    println!("Migrations applied");
    Ok(())
}
