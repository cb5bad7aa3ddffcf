use api::auth::{Role, generate_jwt};
use db::models::{
    category::Model as CategoryModel, tutor::Model as TutorModel,
    tutor_period::Model as TutorPeriodModel,
};
use sea_orm::DatabaseConnection;
use util::period::Period;

pub const PERIOD: &str = "1C2025";

pub fn token(role: Role) -> String {
    let (token, _) = generate_jwt(1, role).expect("Failed to sign token");
    token
}

pub async fn register_tutor(db: &DatabaseConnection, email: &str, name: &str, period: &str) -> TutorModel {
    let tutor = TutorModel::create(db, email, name).await.unwrap();
    let period = Period::parse(period).unwrap();
    TutorPeriodModel::register(db, tutor.id, &period).await.unwrap();
    tutor
}

pub async fn category(db: &DatabaseConnection, name: &str) -> CategoryModel {
    CategoryModel::create(db, name).await.unwrap()
}
