use serde::Deserialize;

use crate::core::wire::de_opt_string_from_any;

#[derive(Deserialize)]
pub(crate) struct NewsEnvelope {
    #[serde(default)]
    pub(crate) data: Option<Vec<RawPost>>,
}

#[derive(Deserialize)]
pub(crate) struct RawPost {
    #[serde(default, deserialize_with = "de_opt_string_from_any")]
    pub(crate) id: Option<String>,
    #[serde(default, rename = "publishedDate")]
    pub(crate) published_date: Option<String>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) summary: Option<String>,
    #[serde(default, rename = "mediaUrl")]
    pub(crate) media_url: Option<String>,
}
