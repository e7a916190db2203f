//! Integration tests for the OpenWeather client and the state holder using wiremock.

use std::time::Duration;

use weather_core::{
    App, Config, FETCH_ERROR_MESSAGE, FetchError, Icon, IconResolver, OpenWeatherProvider,
    RequestStatus, WeatherProvider, WeatherSnapshot, provider_from_config,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn chennai_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 80.2785, "lat": 13.0878 },
        "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
        "base": "stations",
        "main": { "temp": 23.7, "feels_like": 24.3, "temp_min": 23.7, "temp_max": 23.7, "pressure": 1009, "humidity": 83 },
        "visibility": 6000,
        "wind": { "speed": 4.63, "deg": 250 },
        "clouds": { "all": 75 },
        "dt": 1_700_000_000,
        "sys": { "type": 1, "id": 9218, "country": "IN", "sunrise": 1_699_921_000, "sunset": 1_699_963_000 },
        "timezone": 19800,
        "id": 1_264_527,
        "name": "Chennai",
        "cod": 200
    })
}

fn not_found_response() -> serde_json::Value {
    serde_json::json!({ "cod": "404", "message": "city not found" })
}

fn create_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    #[allow(clippy::expect_used)]
    OpenWeatherProvider::new("TEST_KEY".into(), mock_server.uri(), Duration::from_secs(5))
        .expect("Failed to create provider")
}

fn create_app(mock_server: &MockServer) -> App {
    let config = Config {
        api_key: Some("TEST_KEY".into()),
        base_url: mock_server.uri(),
        timeout_secs: 5,
        ..Config::default()
    };
    #[allow(clippy::expect_used)]
    let provider = provider_from_config(&config).expect("Failed to create provider");
    App::new(provider, IconResolver::default(), config.default_city)
}

async fn mount_city(mock_server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", city))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_client_parses_current_conditions() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "chennai",
        ResponseTemplate::new(200).set_body_json(chennai_response()),
    )
    .await;

    let conditions = create_provider(&mock_server)
        .current_by_city("chennai")
        .await
        .expect("should succeed");

    assert_eq!(conditions.city, "Chennai");
    assert_eq!(conditions.country, "IN");
    assert_eq!(conditions.humidity_pct, 83);
    assert_eq!(conditions.condition_code.as_deref(), Some("10d"));
}

#[tokio::test]
async fn test_client_reports_not_found_from_payload() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "atlantis",
        ResponseTemplate::new(404).set_body_json(not_found_response()),
    )
    .await;

    let err = create_provider(&mock_server).current_by_city("atlantis").await.unwrap_err();
    assert_eq!(err, FetchError::CityNotFound);
}

#[tokio::test]
async fn test_not_found_payload_wins_over_success_status() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "atlantis",
        ResponseTemplate::new(200).set_body_json(not_found_response()),
    )
    .await;

    let err = create_provider(&mock_server).current_by_city("atlantis").await.unwrap_err();
    assert_eq!(err, FetchError::CityNotFound);
}

#[tokio::test]
async fn test_client_malformed_body_is_failure() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "chennai",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let err = create_provider(&mock_server).current_by_city("chennai").await.unwrap_err();
    assert!(matches!(err, FetchError::Failure(_)));
}

#[tokio::test]
async fn test_initial_load_searches_default_city() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "chennai",
        ResponseTemplate::new(200).set_body_json(chennai_response()),
    )
    .await;

    let mut app = create_app(&mock_server);
    let status = app.search().await.clone();

    let RequestStatus::Success(snapshot) = status else {
        panic!("expected success, got {status:?}");
    };
    assert_eq!(snapshot.temperature, 23);
    assert_eq!(snapshot.city, "Chennai");
    assert_eq!(snapshot.country, "IN");
    assert_eq!(snapshot.latitude, 13.0878);
    assert_eq!(snapshot.longitude, 80.2785);
    assert_eq!(snapshot.wind_speed, 4.63);
    assert_eq!(snapshot.icon, Icon::Rain);
    assert_eq!(app.query(), "Chennai");
}

#[tokio::test]
async fn test_not_found_leaves_snapshot_unchanged() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "chennai",
        ResponseTemplate::new(200).set_body_json(chennai_response()),
    )
    .await;
    mount_city(
        &mock_server,
        "atlantis",
        ResponseTemplate::new(404).set_body_json(not_found_response()),
    )
    .await;

    let mut app = create_app(&mock_server);
    app.search().await;
    let before = app.snapshot().clone();

    app.set_query("atlantis");
    let status = app.search().await;

    assert_eq!(status, &RequestStatus::NotFound);
    assert_eq!(app.snapshot(), &before);
}

#[tokio::test]
async fn test_empty_query_is_sent_and_provider_error_drives_state() {
    let mock_server = MockServer::start().await;
    mount_city(
        &mock_server,
        "",
        ResponseTemplate::new(400)
            .set_body_json(serde_json::json!({ "cod": "400", "message": "Nothing to geocode" })),
    )
    .await;

    let mut app = create_app(&mock_server);
    app.set_query("");
    let status = app.search().await;

    assert_eq!(status, &RequestStatus::Error(FETCH_ERROR_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_connection_refused_sets_error_and_clears_loading() {
    // Nothing listens on port 1.
    let provider = OpenWeatherProvider::new(
        "TEST_KEY".into(),
        "http://127.0.0.1:1".into(),
        Duration::from_secs(5),
    )
    .expect("Failed to create provider");
    let mut app = App::new(Box::new(provider), IconResolver::default(), "chennai");

    let status = app.search().await;

    assert_eq!(status, &RequestStatus::Error("Error While Fetching Data!".to_string()));
    assert!(!app.status().is_loading());
    assert_eq!(app.snapshot(), &WeatherSnapshot::default());
}
