use nepse_sentiment::{HistoryBuilder, NepseClient};

#[tokio::test]
#[ignore]
async fn live_history_smoke() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = NepseClient::builder().build().unwrap();
    let bars = HistoryBuilder::new(&client, "NABIL")
        .countback(30)
        .fetch()
        .await
        .unwrap();

    assert!(!bars.is_empty());
    assert!(bars.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
    assert!(bars[0].open > 0.0 && bars[0].close > 0.0);
}
