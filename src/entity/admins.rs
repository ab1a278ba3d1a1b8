use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::otp_tokens::Entity")]
    OtpTokens,
    #[sea_orm(has_many = "super::admin_sessions::Entity")]
    AdminSessions,
}

impl Related<super::otp_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtpTokens.def()
    }
}

impl Related<super::admin_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
