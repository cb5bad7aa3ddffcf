use std::collections::{BTreeSet, HashMap};

use db::models::{
    category::Model as CategoryModel, topic::Model as TopicModel, tutor::Model as TutorModel,
    tutor_period::Model as TutorPeriodModel,
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr, TransactionTrait,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use util::period::Period;

use crate::csv_import::parse_topics_csv;

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidCsv(String),

    #[error("{0}")]
    DuplicateTopic(String),

    #[error("{0}")]
    DuplicateCategory(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One topic to create, either from a JSON body or a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicRequest {
    pub name: String,
    pub category: String,
    pub tutor_email: String,
    pub capacity: i32,
}

impl TopicRequest {
    fn normalized(&self) -> Result<TopicRequest, TopicError> {
        let name = self.name.trim();
        let category = self.category.trim();
        let tutor_email = self.tutor_email.trim();

        if name.is_empty() {
            return Err(TopicError::Validation("Topic name cannot be empty".into()));
        }
        if category.is_empty() {
            return Err(TopicError::Validation("Category cannot be empty".into()));
        }
        if tutor_email.is_empty() {
            return Err(TopicError::Validation("Tutor email cannot be empty".into()));
        }
        if self.capacity < 1 {
            return Err(TopicError::Validation("Capacity must be at least 1".into()));
        }

        Ok(TopicRequest {
            name: name.to_owned(),
            category: category.to_owned(),
            tutor_email: tutor_email.to_owned(),
            capacity: self.capacity,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
}

impl From<CategoryModel> for CategoryView {
    fn from(c: CategoryModel) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TutorView {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<TutorModel> for TutorView {
    fn from(t: TutorModel) -> Self {
        Self {
            id: t.id,
            email: t.email,
            name: t.name,
        }
    }
}

/// A topic with its category and tutor expanded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicDetails {
    pub id: i64,
    pub name: String,
    pub period: String,
    pub capacity: i32,
    pub category: CategoryView,
    pub tutor: TutorView,
}

impl TopicDetails {
    fn new(topic: TopicModel, category: CategoryModel, tutor: TutorModel) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            period: topic.period,
            capacity: topic.capacity,
            category: category.into(),
            tutor: tutor.into(),
        }
    }
}

/// Lookups already performed during one import, keyed by lowercased name/email.
#[derive(Default)]
struct ResolveCache {
    categories: HashMap<String, CategoryModel>,
    tutors: HashMap<String, (TutorPeriodModel, TutorModel)>,
}

pub struct TopicService {
    db: DatabaseConnection,
}

impl TopicService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_topics(&self) -> Result<Vec<TopicDetails>, TopicError> {
        let topics = TopicModel::find_all(&self.db, None).await?;
        expand(&self.db, topics).await
    }

    pub async fn get_topics_by_period(
        &self,
        period: &Period,
    ) -> Result<Vec<TopicDetails>, TopicError> {
        let topics = TopicModel::find_all(&self.db, Some(period)).await?;
        expand(&self.db, topics).await
    }

    pub async fn add_category(&self, name: &str) -> Result<CategoryView, TopicError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TopicError::Validation("Category name cannot be empty".into()));
        }
        if CategoryModel::find_by_name(&self.db, name).await?.is_some() {
            return Err(duplicate_category(name));
        }

        let category = insert_category(&self.db, name).await?;

        info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category.into())
    }

    /// Creates one topic. The category is reused or created; nothing is kept on failure.
    pub async fn add_topic(
        &self,
        period: &Period,
        request: &TopicRequest,
    ) -> Result<TopicDetails, TopicError> {
        let request = request.normalized()?;

        let txn = self.db.begin().await?;
        let mut cache = ResolveCache::default();
        let outcome = insert_topic(&txn, period, &request, &mut cache).await;
        let created = finish(txn, outcome).await?;

        info!(topic_id = created.id, period = %period, "Topic created");
        Ok(created)
    }

    /// Imports every row of an uploaded CSV file in a single transaction.
    ///
    /// Returns the created topics in file order. Any failure leaves the
    /// database untouched.
    pub async fn create_topics_from_csv(
        &self,
        period: &Period,
        content: &str,
    ) -> Result<Vec<TopicDetails>, TopicError> {
        let requests = parse_topics_csv(content)?;

        let txn = self.db.begin().await?;
        let outcome = insert_all(&txn, period, &requests).await;
        let created = finish(txn, outcome).await?;

        info!(count = created.len(), period = %period, "Topics imported from CSV");
        Ok(created)
    }

    pub async fn delete_topic(&self, topic_id: i64) -> Result<(), TopicError> {
        if !TopicModel::delete(&self.db, topic_id).await? {
            return Err(TopicError::NotFound(format!("Topic {topic_id} not found")));
        }
        info!(topic_id, "Topic deleted");
        Ok(())
    }
}

/// Commits on success, rolls back otherwise, and hands the outcome through.
async fn finish<T>(txn: DatabaseTransaction, outcome: Result<T, TopicError>) -> Result<T, TopicError> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            txn.rollback().await?;
            Err(err)
        }
    }
}

async fn insert_all<C: ConnectionTrait>(
    db: &C,
    period: &Period,
    requests: &[TopicRequest],
) -> Result<Vec<TopicDetails>, TopicError> {
    let mut cache = ResolveCache::default();
    let mut created = Vec::with_capacity(requests.len());
    for request in requests {
        created.push(insert_topic(db, period, request, &mut cache).await?);
    }
    Ok(created)
}

fn duplicate_category(name: &str) -> TopicError {
    TopicError::DuplicateCategory(format!("Category '{name}' already exists"))
}

/// Inserts a category, reporting a unique-index hit (e.g. a concurrent insert of
/// the same name in another case) as a conflict.
async fn insert_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<CategoryModel, TopicError> {
    CategoryModel::create(db, name)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_category(name),
            _ => TopicError::Database(e),
        })
}

fn duplicate_topic(name: &str, period: &Period) -> TopicError {
    TopicError::DuplicateTopic(format!("Topic '{name}' already exists in period {period}"))
}

async fn resolve_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
    cache: &mut ResolveCache,
) -> Result<CategoryModel, TopicError> {
    let key = name.to_ascii_lowercase();
    if let Some(category) = cache.categories.get(&key) {
        return Ok(category.clone());
    }

    let category = match CategoryModel::find_by_name(db, name).await? {
        Some(existing) => existing,
        None => insert_category(db, name).await?,
    };
    cache.categories.insert(key, category.clone());
    Ok(category)
}

async fn resolve_tutor<C: ConnectionTrait>(
    db: &C,
    email: &str,
    period: &Period,
    cache: &mut ResolveCache,
) -> Result<(TutorPeriodModel, TutorModel), TopicError> {
    let key = email.to_ascii_lowercase();
    if let Some(found) = cache.tutors.get(&key) {
        return Ok(found.clone());
    }

    let found = TutorPeriodModel::find_by_tutor_email(db, email, period)
        .await?
        .ok_or_else(|| {
            TopicError::NotFound(format!(
                "Tutor '{email}' is not registered for period {period}"
            ))
        })?;
    cache.tutors.insert(key, found.clone());
    Ok(found)
}

async fn insert_topic<C: ConnectionTrait>(
    db: &C,
    period: &Period,
    request: &TopicRequest,
    cache: &mut ResolveCache,
) -> Result<TopicDetails, TopicError> {
    let (registration, tutor) = resolve_tutor(db, &request.tutor_email, period, cache).await?;

    if TopicModel::exists_in_period(db, &request.name, period).await? {
        return Err(duplicate_topic(&request.name, period));
    }

    let category = resolve_category(db, &request.category, cache).await?;

    let topic = TopicModel::create(
        db,
        &request.name,
        period,
        category.id,
        registration.id,
        request.capacity,
    )
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_topic(&request.name, period),
        _ => TopicError::Database(e),
    })?;

    Ok(TopicDetails::new(topic, category, tutor))
}

async fn expand<C: ConnectionTrait>(
    db: &C,
    topics: Vec<TopicModel>,
) -> Result<Vec<TopicDetails>, TopicError> {
    if topics.is_empty() {
        return Ok(Vec::new());
    }

    // One bind parameter per distinct id, not per topic.
    let category_ids: BTreeSet<i64> = topics.iter().map(|t| t.category_id).collect();
    let registration_ids: BTreeSet<i64> = topics.iter().map(|t| t.tutor_period_id).collect();

    let categories: HashMap<i64, CategoryModel> = CategoryModel::find_by_ids(db, category_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let tutors: HashMap<i64, TutorModel> =
        TutorPeriodModel::find_by_ids_with_tutor(db, registration_ids)
            .await?
            .into_iter()
            .filter_map(|(registration, tutor)| tutor.map(|t| (registration.id, t)))
            .collect();

    topics
        .into_iter()
        .map(|topic| {
            let category = categories.get(&topic.category_id).cloned().ok_or_else(|| {
                DbErr::RecordNotFound(format!("category {} of topic {}", topic.category_id, topic.id))
            })?;
            let tutor = tutors.get(&topic.tutor_period_id).cloned().ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "tutor period {} of topic {}",
                    topic.tutor_period_id, topic.id
                ))
            })?;
            Ok(TopicDetails::new(topic, category, tutor))
        })
        .collect()
}
