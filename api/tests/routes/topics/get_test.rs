#[cfg(test)]
mod tests {
    use crate::helpers::data::{PERIOD, category, register_tutor, token};
    use crate::helpers::{body_json, make_test_app};
    use api::auth::Role;
    use axum::{
        body::Body,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CACHE_CONTROL},
        },
    };
    use db::models::{topic::Model as TopicModel, tutor_period::Model as TutorPeriodModel};
    use sea_orm::DatabaseConnection;
    use serial_test::serial;
    use tower::ServiceExt;
    use util::period::Period;

    async fn seed(db: &DatabaseConnection) {
        let algorithms = category(db, "Algorithms").await;
        register_tutor(db, "ada@example.com", "Ada", PERIOD).await;
        register_tutor(db, "grace@example.com", "Grace", "2C2025").await;

        let first = Period::parse(PERIOD).unwrap();
        let second = Period::parse("2C2025").unwrap();
        let (ada, _) = TutorPeriodModel::find_by_tutor_email(db, "ada@example.com", &first)
            .await
            .unwrap()
            .unwrap();
        let (grace, _) = TutorPeriodModel::find_by_tutor_email(db, "grace@example.com", &second)
            .await
            .unwrap()
            .unwrap();

        TopicModel::create(db, "Graphs", &first, algorithms.id, ada.id, 2).await.unwrap();
        TopicModel::create(db, "Sorting", &second, algorithms.id, grace.id, 1).await.unwrap();
        TopicModel::create(db, "Heaps", &first, algorithms.id, ada.id, 1).await.unwrap();
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        req.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn student_lists_all_topics_with_private_cache() {
        let (app, state) = make_test_app().await;
        seed(state.db()).await;

        let response = app
            .oneshot(get("/api/topics", Some(&token(Role::Student))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "private, max-age=60"
        );

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        let topics = json["data"].as_array().unwrap();
        let names: Vec<_> = topics.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Graphs", "Sorting", "Heaps"]);

        assert_eq!(topics[0]["category"]["name"], "Algorithms");
        assert_eq!(topics[0]["tutor"]["email"], "ada@example.com");
        assert_eq!(topics[0]["tutor"]["name"], "Ada");
        assert_eq!(topics[0]["capacity"], 2);
        assert_eq!(topics[0]["period"], PERIOD);
    }

    #[tokio::test]
    #[serial]
    async fn filters_by_period() {
        let (app, state) = make_test_app().await;
        seed(state.db()).await;

        let response = app
            .oneshot(get("/api/topics?period=2C2025", Some(&token(Role::Tutor))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let topics = json["data"].as_array().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0]["name"], "Sorting");
        assert_eq!(topics[0]["tutor"]["email"], "grace@example.com");
    }

    #[tokio::test]
    #[serial]
    async fn trailing_slash_collection_path_is_served() {
        let (app, state) = make_test_app().await;
        seed(state.db()).await;

        let response = app
            .oneshot(get(
                &format!("/api/topics/?period={PERIOD}"),
                Some(&token(Role::Student)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "private, max-age=60"
        );

        let json = body_json(response).await;
        let names: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Graphs", "Heaps"]);
    }

    #[tokio::test]
    #[serial]
    async fn trailing_slash_collection_path_still_requires_a_token() {
        let (app, _) = make_test_app().await;

        let response = app.oneshot(get("/api/topics/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn empty_database_returns_empty_list() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(get("/api/topics", Some(&token(Role::Admin))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"], serde_json::json!([]));
    }

    #[tokio::test]
    #[serial]
    async fn malformed_period_is_unprocessable() {
        let (app, _) = make_test_app().await;

        for period in ["3C2024", "1c2024", "1C1999", "%7CC2024"] {
            let response = app
                .clone()
                .oneshot(get(
                    &format!("/api/topics?period={period}"),
                    Some(&token(Role::Student)),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{period}");
        }
    }

    #[tokio::test]
    #[serial]
    async fn missing_token_is_unauthorized() {
        let (app, _) = make_test_app().await;

        let response = app.oneshot(get("/api/topics", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["success"], false);
    }
}
