/// Read the response body as text, failing on a non-2xx status.
///
/// `endpoint` and `key` only label the debug log line.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    endpoint: &str,
    key: &str,
) -> Result<String, crate::core::NepseError> {
    if !resp.status().is_success() {
        return Err(crate::core::NepseError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }

    let text = resp.text().await?;
    tracing::debug!(endpoint, key, bytes = text.len(), "response body received");
    Ok(text)
}
