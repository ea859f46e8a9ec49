use serde::Deserialize;

use crate::core::wire::de_opt_f64_lenient;

#[derive(Deserialize)]
pub(crate) struct CandleEnvelope {
    #[serde(default)]
    pub(crate) success: Option<bool>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) data: Option<Vec<RawCandle>>,
}

#[derive(Deserialize)]
pub(crate) struct RawCandle {
    pub(crate) time: i64,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) open: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) high: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) low: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) close: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub(crate) volume: Option<f64>,
}
