/// Integration tests for the HTTP catalog client against a mock API
use appcost::{
    catalog::{Catalog, CatalogClient, CategoryId, FeatureId},
    error::AppError,
    estimator::Estimator,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_fetch_categories() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).json_body(json!([
                {"id": 1, "name": "E-commerce"},
                {"id": 2, "name": "Social Media"}
            ]));
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let categories = client.categories().await.unwrap();

    mock.assert_async().await;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, CategoryId(2));
    assert_eq!(categories[1].name, "Social Media");
}

#[tokio::test]
async fn test_fetch_features_sends_category_filter() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/features/")
                .query_param("category_id", "7");
            then.status(200).json_body(json!([
                {"id": 11, "name": "Push notifications", "hours": 16},
                {"id": 12, "name": "Offline mode", "hours": 24}
            ]));
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let features = client.features(CategoryId(7)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].id, FeatureId(11));
    assert_eq!(features[1].hours, 24);
}

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/features/");
            then.status(400)
                .json_body(json!({"error": "Category ID is required"}));
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let err = client.features(CategoryId(1)).await.unwrap_err();

    match err {
        AppError::UpstreamError { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Category ID is required");
        }
        other => panic!("Expected UpstreamError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(503);
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let err = client.categories().await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let err = client.categories().await.unwrap_err();

    assert!(matches!(err, AppError::DecodeError(_)));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on the discard port
    let client = CatalogClient::new("http://127.0.0.1:9");
    let err = client.categories().await.unwrap_err();

    assert!(matches!(err, AppError::HttpRequest(_)));
}

#[tokio::test]
async fn test_quote_sends_selected_features() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/calculate/")
                .query_param("category_id", "3")
                .query_param("features[]", "1")
                .query_param("features[]", "2");
            then.status(200).json_body(json!({"total_cost": 80}));
        })
        .await;

    let client = CatalogClient::new(server.base_url());
    let total = client
        .quote(Some(CategoryId(3)), &[FeatureId(1), FeatureId(2)])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(total, 80);
}

#[tokio::test]
async fn test_estimator_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/categories/");
            then.status(200)
                .json_body(json!([{"id": 3, "name": "Productivity"}]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/features/")
                .query_param("category_id", "3");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Calendar sync", "hours": 5},
                {"id": 2, "name": "Reminders", "hours": 3}
            ]));
        })
        .await;

    let mut est = Estimator::new(Arc::new(CatalogClient::new(server.base_url())));
    est.load_categories();
    est.select_category(Some(CategoryId(3)));
    est.settle().await;

    est.toggle_feature_at(0).unwrap();
    est.toggle_feature_at(1).unwrap();

    assert_eq!(est.compute_cost().unwrap(), 80);
    assert_eq!(est.state().categories[0].name, "Productivity");
}
