use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age_months: Option<i32>,
    pub photo_url: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    #[sea_orm(unique)]
    pub tag_code: String,
    pub qr_url: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lost_reports::Entity")]
    LostReports,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::lost_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LostReports.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
