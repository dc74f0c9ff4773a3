use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    /// Internal surrogate key; never leaves the storage layer.
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub external_id: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub user_id: Option<String>,
    pub tenant_id: i32,
    pub time_created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feedback_tag::Entity")]
    Tags,
}

impl Related<super::feedback_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
