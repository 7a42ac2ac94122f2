use garmin_connect_client::http_client::ReqwestGarminClient;
use garmin_connect_client::{DateRange, GarminClient, GarminConfig, GarminError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACTIVITIES: &str = "/modern/proxy/activitylist-service/activities/search/activities";

fn client_for(server: &MockServer) -> ReqwestGarminClient {
    let config = GarminConfig::with_urls(&server.uri(), &format!("{}/sso", server.uri()));
    ReqwestGarminClient::new(config).expect("client")
}

#[tokio::test]
async fn get_activities_sends_exact_date_query() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"activityId": 1, "activityName": "Morning Run"},
        {"activityId": 2, "activityName": "Evening Ride"}
    ]);
    Mock::given(method("GET"))
        .and(path(ACTIVITIES))
        .and(query_param("startDate", "2019-01-01"))
        .and(query_param("endDate", "2019-01-31"))
        .and(header("origin", "https://sso.garmin.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let range = DateRange::parse("2019-01-01", "2019-01-31").unwrap();
    let raw = client.get_activities(&range).await.expect("activities");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json body");
    assert_eq!(parsed, body);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].url.query(),
        Some("startDate=2019-01-01&endDate=2019-01-31")
    );
    let agent = received[0].headers.get("user-agent").cloned().unwrap();
    assert!(agent.to_str().unwrap().starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn get_activity_batch_decodes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACTIVITIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"activityId": 7, "distance": 10000.0}
        ])))
        .mount(&server)
        .await;

    let range = DateRange::parse("2020-02-01", "2020-02-29").unwrap();
    let batch = client_for(&server)
        .get_activity_batch(&range)
        .await
        .expect("batch");
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0]["activityId"], 7);
}

#[tokio::test]
async fn unauthenticated_fetch_is_http_error_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACTIVITIES))
        .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::parse("2019-01-01", "2019-01-31").unwrap();
    let err = client_for(&server)
        .get_activities(&range)
        .await
        .expect_err("401");
    assert!(err.is_http());
    match err {
        GarminError::Status { status, url, .. } => {
            assert_eq!(status, 401);
            assert!(url.contains("startDate=2019-01-01"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn reversed_range_is_sent_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACTIVITIES))
        .and(query_param("startDate", "2019-12-31"))
        .and(query_param("endDate", "2019-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::parse("2019-12-31", "2019-01-01").unwrap();
    let raw = client_for(&server)
        .get_activities(&range)
        .await
        .expect("activities");
    assert_eq!(raw, "[]");
}

#[tokio::test]
async fn unpadded_dates_are_sent_as_written() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACTIVITIES))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::parse("2018-01-1", "2018-12-31").unwrap();
    client_for(&server)
        .get_activities(&range)
        .await
        .expect("activities");

    let received = server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.query(),
        Some("startDate=2018-01-1&endDate=2018-12-31")
    );
}
