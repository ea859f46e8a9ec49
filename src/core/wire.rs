use serde::{Deserialize, Deserializer};

/// Accepts a string, an integer or a float (written without a fractional part)
/// and yields it as a string; `null`/missing becomes `None`.
///
/// The news feed has served post ids both as JSON numbers and as strings.
pub(crate) fn de_opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AnyId {
        Str(String),
        U64(u64),
        I64(i64),
        F64(f64),
    }

    Ok(match Option::<AnyId>::deserialize(deserializer)? {
        None => None,
        Some(AnyId::Str(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Some(AnyId::U64(u)) => Some(u.to_string()),
        Some(AnyId::I64(i)) => Some(i.to_string()),
        Some(AnyId::F64(f)) => {
            if f.is_finite() && f.fract() == 0.0 {
                Some(format!("{f:.0}"))
            } else {
                return Err(serde::de::Error::custom(format!(
                    "cannot use float {f} as an identifier"
                )));
            }
        }
    })
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
pub(crate) fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}
