use pet_koi_api::{
    config::AppConfig,
    db::{apply_migrations, connect},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = connect(&config.database_url).await?;
    apply_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
