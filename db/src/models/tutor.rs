use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::ConnectionTrait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::lower_eq;

/// A person topics can be booked with. Identified externally by email.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "tutors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tutor_period::Entity")]
    TutorPeriods,
}

impl Related<super::tutor_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TutorPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        email: &str,
        name: &str,
    ) -> Result<Model, DbErr> {
        let tutor = ActiveModel {
            email: Set(email.trim().to_ascii_lowercase()),
            name: Set(name.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        tutor.insert(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(lower_eq::<Entity, _>(Column::Email, email.trim()))
            .one(db)
            .await
    }
}
