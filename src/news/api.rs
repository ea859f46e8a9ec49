use crate::{
    core::{NepseClient, NepseError, RetryConfig, net},
    news::{
        model::{Article, NewsPage},
        wire,
    },
};

pub(super) async fn fetch_news_page(
    client: &NepseClient,
    media_type: &str,
    size: u32,
    last_post_id: Option<&str>,
    retry_override: Option<&RetryConfig>,
) -> Result<NewsPage, NepseError> {
    let mut url = client.base_news().clone();
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("MediaType", media_type);
        qp.append_pair("Size", &size.to_string());
        if let Some(id) = last_post_id {
            qp.append_pair("LastPostId", id);
        }
    }

    let resp = client
        .send_with_retry(client.http().get(url), retry_override)
        .await?;
    let body = net::get_text(resp, "news_page", last_post_id.unwrap_or("first")).await?;
    decode_page(&body)
}

fn decode_page(body: &str) -> Result<NewsPage, NepseError> {
    let envelope: wire::NewsEnvelope = serde_json::from_str(body)?;
    let raw = envelope.data.unwrap_or_default();
    let raw_len = raw.len();
    let next_cursor = raw.last().and_then(|p| p.id.clone());

    let articles = raw
        .into_iter()
        .filter_map(|p| {
            let Some(id) = p.id else {
                tracing::debug!("dropping feed item without id");
                return None;
            };
            Some(Article {
                id,
                published_date: p.published_date.unwrap_or_default(),
                title: p.title.unwrap_or_default(),
                summary: p.summary.unwrap_or_default(),
                media_url: p.media_url.unwrap_or_default(),
            })
        })
        .collect();

    Ok(NewsPage {
        articles,
        raw_len,
        next_cursor,
    })
}
