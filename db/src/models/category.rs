use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use super::lower_eq;

/// A grouping label for topics, e.g. "Algorithms" or "Databases".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Unique, compared case-insensitively by the helpers below.
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::topic::Entity")]
    Topics,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, DbErr> {
        let category = ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        };
        category.insert(db).await
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(lower_eq::<Entity, _>(Column::Name, name))
            .one(db)
            .await
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find().filter(Column::Id.is_in(ids)).all(db).await
    }
}
