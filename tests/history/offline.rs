use httpmock::Method::GET;
use nepse_sentiment::{HistoryBuilder, NepseError};

use crate::common::{client_for, fixture, setup_server, utc_ms};

#[tokio::test]
async fn candles_are_sorted_and_incomplete_bars_dropped() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candles")
            .query_param("symbol", "NABIL")
            .query_param("resolution", "1D")
            .query_param("isAdjust", "true")
            .query_param("countback", "60");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("candles", "NABIL", "json"));
    });
    let client = client_for(&server);

    let bars = HistoryBuilder::new(&client, "NABIL")
        .countback(60)
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].time_ms, utc_ms(2025, 7, 1));
    assert_eq!(bars[0].close, 510.0);
    assert_eq!(bars[1].time_ms, utc_ms(2025, 7, 2));
    assert_eq!(bars[1].open, 512.5);
    assert_eq!(bars[1].close, 515.0);
    assert_eq!(bars[1].volume, Some(10230.0));
    assert_eq!(
        bars[0].datetime_utc().unwrap().to_rfc3339(),
        "2025-07-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn full_history_omits_countback() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candles")
            .query_param("symbol", "EBL")
            .query_param("isAdjust", "false")
            .query_param_missing("countback");
        then.status(200)
            .body(r#"{"success":true,"data":[{"time":1751328000000,"open":1,"close":2}]}"#);
    });
    let client = client_for(&server);

    let bars = HistoryBuilder::new(&client, "EBL")
        .adjusted(false)
        .fetch()
        .await
        .unwrap();
    mock.assert();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].high, None);
}

#[tokio::test]
async fn unsuccessful_or_empty_answers_are_api_errors() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/candles").query_param("symbol", "BAD");
        then.status(200)
            .body(r#"{"success":false,"message":"unknown symbol"}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/candles").query_param("symbol", "NONE");
        then.status(200).body(r#"{"success":true,"data":[]}"#);
    });
    let client = client_for(&server);

    let err = HistoryBuilder::new(&client, "BAD").fetch().await.unwrap_err();
    assert!(matches!(&err, NepseError::Api(m) if m.contains("unknown symbol")), "{err}");

    let err = HistoryBuilder::new(&client, "NONE").fetch().await.unwrap_err();
    assert!(matches!(err, NepseError::Api(_)), "{err}");
}

#[tokio::test]
async fn gateway_errors_are_retried() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/candles");
        then.status(502);
    });
    let client = client_for(&server);

    let err = HistoryBuilder::new(&client, "NABIL").fetch().await.unwrap_err();
    mock.assert_calls(3);
    assert!(matches!(err, NepseError::Status { status: 502, .. }));
}
