use argon2::{Argon2, PasswordHasher};
use password_hash::{SaltString, rand_core::OsRng};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use pet_koi_api::{
    config::AppConfig,
    db::{apply_migrations, connect},
    entity::{
        Admins,
        admins::{ActiveModel as AdminActive, Column as AdminCol},
    },
    models::AdminRole,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = connect(&config.database_url).await?;
    apply_migrations(&orm).await?;

    let super_admin = ensure_admin(
        &orm,
        "admin@petkoi.example",
        "admin123",
        "Root Admin",
        AdminRole::SuperAdmin,
    )
    .await?;
    let tracker = ensure_admin(
        &orm,
        "tracker@petkoi.example",
        "tracker123",
        "Order Tracker",
        AdminRole::OrderTracker,
    )
    .await?;

    println!("Seed completed. Super admin ID: {super_admin}, tracker ID: {tracker}");
    Ok(())
}

async fn ensure_admin(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    name: &str,
    role: AdminRole,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Admins::find()
        .filter(AdminCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("Admin {email} already present (role={})", existing.role);
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let admin = AdminActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured admin {email} (role={})", role.as_str());
    Ok(admin.id)
}
