use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub description: String,
    pub pg_rating_id: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pg_rating::Entity",
        from = "Column::PgRatingId",
        to = "super::pg_rating::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    PgRating,
}

impl Related<super::pg_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PgRating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
