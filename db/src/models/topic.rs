use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use util::period::Period;

use super::lower_eq;

/// A subject a tutor can be booked for, scoped to an academic period.
///
/// `(name, period)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub period: String,
    pub category_id: i64,
    pub tutor_period_id: i64,
    /// Number of groups the tutor accepts for this topic.
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::tutor_period::Entity",
        from = "Column::TutorPeriodId",
        to = "super::tutor_period::Column::Id",
        on_delete = "Cascade"
    )]
    TutorPeriod,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::tutor_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TutorPeriod.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        name: &str,
        period: &Period,
        category_id: i64,
        tutor_period_id: i64,
        capacity: i32,
    ) -> Result<Model, DbErr> {
        let topic = ActiveModel {
            name: Set(name.to_owned()),
            period: Set(period.to_string()),
            category_id: Set(category_id),
            tutor_period_id: Set(tutor_period_id),
            capacity: Set(capacity),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        topic.insert(db).await
    }

    /// Whether a topic with this name (ASCII case-insensitive) already exists in `period`.
    pub async fn exists_in_period<C: ConnectionTrait>(
        db: &C,
        name: &str,
        period: &Period,
    ) -> Result<bool, DbErr> {
        let found = Entity::find()
            .filter(Column::Period.eq(period.as_str()))
            .filter(lower_eq::<Entity, _>(Column::Name, name))
            .one(db)
            .await?;
        Ok(found.is_some())
    }

    /// All topics, or only those of `period`, ordered by id.
    pub async fn find_all<C: ConnectionTrait>(
        db: &C,
        period: Option<&Period>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(period) = period {
            query = query.filter(Column::Period.eq(period.as_str()));
        }
        query.order_by_asc(Column::Id).all(db).await
    }

    /// Deletes by id and returns whether a row was removed.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
