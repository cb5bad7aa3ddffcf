#[cfg(test)]
mod tests {
    use crate::helpers::data::{PERIOD, category, register_tutor, token};
    use crate::helpers::{body_json, make_test_app};
    use api::auth::Role;
    use axum::{
        body::Body,
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE},
        },
    };
    use db::models::{category::Model as CategoryModel, topic::Model as TopicModel};
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn post_json(uri: &str, role: Role, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", token(role)))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn topic_body() -> Value {
        json!({
            "name": "Graph Algorithms",
            "category": "Algorithms",
            "tutor_email": "ada@example.com",
            "capacity": 2
        })
    }

    // --- POST /api/topics/category ---

    #[tokio::test]
    #[serial]
    async fn admin_creates_category() {
        let (app, state) = make_test_app().await;

        let response = app
            .oneshot(post_json("/api/topics/category", Role::Admin, json!({"name": " Networks "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CACHE_CONTROL).unwrap(), "no-store");

        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Networks");
        assert!(json["data"]["id"].as_i64().is_some());
        assert_eq!(CategoryModel::find_all(state.db()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_category_conflicts() {
        let (app, state) = make_test_app().await;
        category(state.db(), "Networks").await;

        let response = app
            .oneshot(post_json("/api/topics/category", Role::Admin, json!({"name": "NETWORKS"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn empty_category_name_is_bad_request() {
        let (app, _) = make_test_app().await;

        for name in ["", "   "] {
            let response = app
                .clone()
                .oneshot(post_json("/api/topics/category", Role::Admin, json!({"name": name})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{name:?}");
        }
    }

    #[tokio::test]
    #[serial]
    async fn unreadable_category_body_uses_the_envelope() {
        let (app, _) = make_test_app().await;

        let malformed = Request::builder()
            .method("POST")
            .uri("/api/topics/category")
            .header(AUTHORIZATION, format!("Bearer {}", token(Role::Admin)))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = app.clone().oneshot(malformed).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);

        let response = app
            .oneshot(post_json("/api/topics/category", Role::Admin, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    #[serial]
    async fn student_cannot_create_category() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(post_json("/api/topics/category", Role::Student, json!({"name": "Networks"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // --- POST /api/topics?period= ---

    #[tokio::test]
    #[serial]
    async fn admin_creates_topic_and_category_on_the_fly() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;

        let response = app
            .oneshot(post_json(
                &format!("/api/topics?period={PERIOD}"),
                Role::Admin,
                topic_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CACHE_CONTROL).unwrap(), "no-store");

        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Graph Algorithms");
        assert_eq!(json["data"]["period"], PERIOD);
        assert_eq!(json["data"]["capacity"], 2);
        assert_eq!(json["data"]["category"]["name"], "Algorithms");
        assert_eq!(json["data"]["tutor"]["email"], "ada@example.com");
        assert_eq!(CategoryModel::find_all(state.db()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn trailing_slash_collection_path_creates_topic() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;
        let uri = format!("/api/topics/?period={PERIOD}");

        let response = app
            .clone()
            .oneshot(post_json(&uri, Role::Admin, topic_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["data"]["name"], "Graph Algorithms");

        let forbidden = app
            .oneshot(post_json(&uri, Role::Student, topic_body()))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(TopicModel::find_all(state.db(), None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn capacity_defaults_to_one() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;

        let body = json!({
            "name": "Heaps",
            "category": "Data Structures",
            "tutor_email": "ada@example.com"
        });
        let response = app
            .oneshot(post_json(&format!("/api/topics?period={PERIOD}"), Role::Admin, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["data"]["capacity"], 1);
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_topic_in_period_conflicts() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;
        let uri = format!("/api/topics?period={PERIOD}");

        let first = app
            .clone()
            .oneshot(post_json(&uri, Role::Admin, topic_body()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let mut again = topic_body();
        again["name"] = json!("graph algorithms");
        let second = app.oneshot(post_json(&uri, Role::Admin, again)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn tutor_not_registered_for_period_is_not_found() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", "2C2025").await;

        let response = app
            .oneshot(post_json(
                &format!("/api/topics?period={PERIOD}"),
                Role::Admin,
                topic_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(TopicModel::find_all(state.db(), None).await.unwrap().is_empty());
        assert!(CategoryModel::find_all(state.db()).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn invalid_body_is_bad_request() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;
        let uri = format!("/api/topics?period={PERIOD}");

        let mut zero_capacity = topic_body();
        zero_capacity["capacity"] = json!(0);
        let mut bad_email = topic_body();
        bad_email["tutor_email"] = json!("not-an-email");

        for body in [zero_capacity, bad_email] {
            let response = app
                .clone()
                .oneshot(post_json(&uri, Role::Admin, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    #[serial]
    async fn unreadable_topic_body_uses_the_envelope() {
        let (app, state) = make_test_app().await;
        register_tutor(state.db(), "ada@example.com", "Ada", PERIOD).await;
        let uri = format!("/api/topics?period={PERIOD}");

        let malformed = Request::builder()
            .method("POST")
            .uri(&uri)
            .header(AUTHORIZATION, format!("Bearer {}", token(Role::Admin)))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let response = app.clone().oneshot(malformed).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);

        let mut missing_email = topic_body();
        missing_email.as_object_mut().unwrap().remove("tutor_email");
        let response = app
            .oneshot(post_json(&uri, Role::Admin, missing_email))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("tutor_email"));

        assert!(TopicModel::find_all(state.db(), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn period_is_required_and_validated() {
        let (app, _) = make_test_app().await;

        for uri in ["/api/topics", "/api/topics?period=1C24"] {
            let response = app
                .clone()
                .oneshot(post_json(uri, Role::Admin, topic_body()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }
    }

    #[tokio::test]
    #[serial]
    async fn tutor_role_cannot_create_topic() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(post_json(
                &format!("/api/topics?period={PERIOD}"),
                Role::Tutor,
                topic_body(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
