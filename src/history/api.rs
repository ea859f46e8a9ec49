use crate::{
    core::{NepseClient, NepseError, RetryConfig, net},
    history::{model::Candle, wire},
};

pub(super) async fn fetch_candles(
    client: &NepseClient,
    symbol: &str,
    resolution: &str,
    countback: Option<u32>,
    adjusted: bool,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<Candle>, NepseError> {
    let mut url = client.base_candles().clone();
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("symbol", symbol);
        qp.append_pair("resolution", resolution);
        if let Some(n) = countback {
            qp.append_pair("countback", &n.to_string());
        }
        qp.append_pair("isAdjust", if adjusted { "true" } else { "false" });
    }

    let resp = client
        .send_with_retry(client.http().get(url), retry_override)
        .await?;
    let body = net::get_text(resp, "candles", symbol).await?;
    decode_candles(&body, symbol)
}

fn decode_candles(body: &str, symbol: &str) -> Result<Vec<Candle>, NepseError> {
    let envelope: wire::CandleEnvelope = serde_json::from_str(body)?;

    if envelope.success != Some(true) {
        return Err(NepseError::Api(format!(
            "candles for {symbol}: {}",
            envelope.message.as_deref().unwrap_or("success=false")
        )));
    }

    let raw = envelope.data.unwrap_or_default();
    if raw.is_empty() {
        return Err(NepseError::Api(format!("candles for {symbol}: no data")));
    }

    let mut candles: Vec<Candle> = raw
        .into_iter()
        .filter_map(|c| {
            let (Some(open), Some(close)) = (c.open, c.close) else {
                tracing::debug!(symbol, time = c.time, "dropping candle without open/close");
                return None;
            };
            Some(Candle {
                time_ms: c.time,
                open,
                high: c.high,
                low: c.low,
                close,
                volume: c.volume,
            })
        })
        .collect();

    candles.sort_by_key(|c| c.time_ms);
    Ok(candles)
}
