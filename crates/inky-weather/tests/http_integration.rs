//! Integration tests for the HTTP collaborators using wiremock.
//!
//! These tests run the geolocator, forecast provider, map sources and the
//! cache against mock HTTP servers.

use inky_weather::{
    CitySlots, Coordinates, Geolocator, IpApiGeolocator, MapPlacement, MapSource,
    OpenMeteoProvider, OsmTileSource, StaticMapSource, WeatherCache, WeatherError, WeatherSource,
};
use std::time::Instant;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.2,
        "longitude": 0.12,
        "current_weather": {
            "temperature": 12.3,
            "weathercode": 3,
            "windspeed": 18.4,
            "winddirection": 225.0,
            "time": "2026-02-22T08:45"
        },
        "daily": {
            "time": ["2026-02-22", "2026-02-23"],
            "temperature_2m_max": [14.2, 11.8],
            "temperature_2m_min": [8.1, 5.9],
            "weathercode": [3, 61],
            "precipitation_sum": [0.5, null]
        }
    })
}

#[tokio::test]
async fn test_geolocate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .and(query_param("fields", "status,message,lat,lon,city"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 52.2053,
            "lon": 0.1218,
            "city": "Cambridge"
        })))
        .mount(&mock_server)
        .await;

    let geolocator = IpApiGeolocator::new(format!("{}/json/", mock_server.uri())).unwrap();
    let fix = geolocator.locate().await.unwrap();

    assert_eq!(fix.city, "Cambridge");
    assert_eq!(fix.coordinates, Coordinates::new(52.2053, 0.1218));
}

#[tokio::test]
async fn test_geolocate_fail_status_is_data_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&mock_server)
        .await;

    let geolocator = IpApiGeolocator::new(format!("{}/json/", mock_server.uri())).unwrap();
    let err = geolocator.locate().await.unwrap_err();

    assert!(matches!(err, WeatherError::Data(ref m) if m.contains("reserved range")));
}

#[tokio::test]
async fn test_geolocate_server_error_is_connectivity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let geolocator = IpApiGeolocator::new(format!("{}/json/", mock_server.uri())).unwrap();
    let err = geolocator.locate().await.unwrap_err();

    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_forecast_query_and_parse() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.2053"))
        .and(query_param("longitude", "0.1218"))
        .and(query_param("current_weather", "true"))
        .and(query_param("forecast_days", "2"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenMeteoProvider::new(format!("{}/v1/forecast", mock_server.uri())).unwrap();
    let forecast = provider
        .forecast(Coordinates::new(52.2053, 0.1218))
        .await
        .unwrap();

    assert_eq!(forecast.current_weather.temperature, 12.3);
    assert_eq!(forecast.daily.temperature_2m_max.len(), 2);
    assert_eq!(forecast.daily.precipitation_sum, vec![Some(0.5), None]);
}

#[tokio::test]
async fn test_forecast_malformed_body_is_data_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"current_weather\": {}"))
        .mount(&mock_server)
        .await;

    let provider = OpenMeteoProvider::new(format!("{}/v1/forecast", mock_server.uri())).unwrap();
    let err = provider
        .forecast(Coordinates::new(51.5, -0.12))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Data(_)));
}

#[tokio::test]
async fn test_forecast_unreachable_is_connectivity() {
    // Nothing listens on the discard port
    let provider = OpenMeteoProvider::new("http://127.0.0.1:9/v1/forecast").unwrap();
    let err = provider
        .forecast(Coordinates::new(51.5, -0.12))
        .await
        .unwrap_err();

    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_tile_fetch() {
    let mock_server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    Mock::given(method("GET"))
        .and(path("/13/4098/2698.png"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = OsmTileSource::new(mock_server.uri(), 13).unwrap();
    let image = source
        .fetch_map(Coordinates::new(52.2053, 0.1218), "Cambridge")
        .await
        .unwrap();

    assert_eq!(image.bytes, png);
    assert!(matches!(
        image.placement,
        MapPlacement::CentredOn { x, y } if x < 256 && y < 256
    ));
}

#[tokio::test]
async fn test_tile_missing_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = OsmTileSource::new(mock_server.uri(), 13).unwrap();
    let result = source
        .fetch_map(Coordinates::new(52.2053, 0.1218), "Cambridge")
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_static_map_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/map"))
        .and(query_param("lat", "55.9533"))
        .and(query_param("lon", "-3.1883"))
        .and(query_param("city", "Edinburgh"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
        .mount(&mock_server)
        .await;

    let source = StaticMapSource::new(mock_server.uri()).unwrap();
    let image = source
        .fetch_map(Coordinates::new(55.9533, -3.1883), "Edinburgh")
        .await
        .unwrap();

    assert_eq!(image.placement, MapPlacement::TopLeft);
    assert_eq!(image.bytes, vec![0xff, 0xd8, 0xff]);
}

#[tokio::test]
async fn test_auto_slot_end_to_end() {
    let geo_server = MockServer::start().await;
    let weather_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 52.2,
            "lon": 0.12,
            "city": "Histon"
        })))
        .expect(1)
        .mount(&geo_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&weather_server)
        .await;

    let geolocator = IpApiGeolocator::new(format!("{}/json/", geo_server.uri())).unwrap();
    let provider = OpenMeteoProvider::new(format!("{}/v1/forecast", weather_server.uri())).unwrap();
    let slots = CitySlots::new(
        vec![("Cambridge".to_string(), Coordinates::new(52.2053, 0.1218))],
        "Cambridge",
    )
    .unwrap();
    let mut cache = WeatherCache::new(slots);

    let snap = cache
        .fetch_and_cache(0, &geolocator, &provider, Instant::now())
        .await
        .unwrap();

    assert_eq!(snap.city, "Histon");
    assert_eq!(snap.temp, 12);
    assert_eq!(snap.wind_dir, "SW");
    assert_eq!(snap.wind_speed, 18);
    assert_eq!(snap.today_high, 14);
    assert_eq!(snap.tomorrow_low, 5);
    assert_eq!(snap.rain_today, "0.5mm");
    assert_eq!(snap.rain_tomorrow, "--");
    assert_eq!(snap.observed, "22/2 08:45");
}

#[tokio::test]
async fn test_stale_entry_survives_server_outage() {
    let mock_server = MockServer::start().await;
    let provider = OpenMeteoProvider::new(format!("{}/v1/forecast", mock_server.uri())).unwrap();
    let geolocator = IpApiGeolocator::new(format!("{}/json/", mock_server.uri())).unwrap();
    let slots = CitySlots::new(
        vec![("London".to_string(), Coordinates::new(51.5074, -0.1278))],
        "London",
    )
    .unwrap();
    let mut cache = WeatherCache::new(slots);

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    cache
        .fetch_and_cache(1, &geolocator, &provider, Instant::now())
        .await
        .unwrap();
    let before = cache.get(1).cloned();

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let result = cache
        .fetch_and_cache(1, &geolocator, &provider, Instant::now())
        .await;

    assert!(result.is_err());
    assert_eq!(cache.get(1).cloned(), before);
    assert_eq!(before.map(|s| s.city), Some("London".to_string()));
}
