use std::sync::{Arc, Mutex};

use argon2::{Argon2, PasswordHasher};
use password_hash::{SaltString, rand_core::OsRng};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

use pet_koi_api::{
    db::{apply_migrations, connect},
    entity::admins::ActiveModel as AdminActive,
    mailer::{Mailer, OutgoingMail},
    models::AdminRole,
    state::AppState,
};

/// Connect to the test database and reset it, capturing outgoing mail in
/// memory. Returns None when no database is configured so the caller can skip.
pub async fn setup_state() -> anyhow::Result<Option<(AppState, Arc<Mutex<Vec<OutgoingMail>>>)>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let orm = connect(&database_url).await?;
    apply_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, lost_reports, pets, donations, support_tickets, \
         otp_tokens, admin_sessions, audit_logs, admins RESTART IDENTITY CASCADE",
    ))
    .await?;

    let (mailer, outbox) = Mailer::in_memory();
    let state = AppState {
        orm,
        mailer,
        jwt_secret: "integration-test-secret".to_string(),
        public_base_url: "https://petkoi.test".to_string(),
    };

    Ok(Some((state, outbox)))
}

pub async fn create_admin(
    state: &AppState,
    email: &str,
    password: &str,
    role: AdminRole,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let admin = AdminActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set("Test Admin".into()),
        password_hash: Set(password_hash),
        role: Set(role.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(admin.id)
}

/// Pull the 6-digit code out of the most recent captured email.
pub fn last_emailed_code(outbox: &Arc<Mutex<Vec<OutgoingMail>>>) -> String {
    let outbox = outbox.lock().expect("outbox lock");
    let mail = outbox.last().expect("expected at least one email");
    mail.body
        .split_whitespace()
        .find(|word| {
            let trimmed = word.trim_end_matches('.');
            trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit())
        })
        .map(|word| word.trim_end_matches('.').to_string())
        .expect("email should contain a 6-digit code")
}
