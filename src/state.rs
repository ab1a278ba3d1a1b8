use sea_orm::DatabaseConnection;

use crate::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub mailer: Mailer,
    pub jwt_secret: String,
    pub public_base_url: String,
}
