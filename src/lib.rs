//! # nepse-sentiment
//!
//! News-driven price adjustment for securities listed on the Nepal Stock Exchange.
//!
//! Articles from the ShareHub news feed are matched to listed companies, scored for
//! sentiment, and compared with the price moves that followed them to learn how
//! credible each publishing domain is. A sentiment-free trend forecast per symbol is
//! then nudged by the latest sentiment, weighted by that credibility.
//!
//! ## Quick start
//!
//! ```no_run
//! use nepse_sentiment::{NepseClient, Pipeline, PipelineConfig, store::DataLayout};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), nepse_sentiment::NepseError> {
//! let client = NepseClient::default();
//! let config = PipelineConfig::default()
//!     .layout(DataLayout::new("output"))
//!     .symbols(["NABIL", "NICA"]);
//! let pipeline = Pipeline::new(client, config)?;
//!
//! for (symbol, p) in pipeline.run_once().await {
//!     println!("{symbol}: {:.2} -> {:.2} ({:.2})", p.historical_close, p.final_close, p.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The stages can also be used on their own: [`CompanyMatcher`] and [`Classifier`]
//! for matching, [`SentimentScorer`] for polarity, [`CredibilityTracker`] for source
//! weights and [`blend::blend`] for the adjustment formula.

pub mod blend;
pub mod classify;
pub mod core;
pub mod credibility;
pub mod entities;
pub mod history;
#[cfg(feature = "tracing-subscriber")]
pub mod logging;
pub mod matcher;
pub mod news;
pub mod pipeline;
pub mod sentiment;
pub mod store;
pub mod trend;

pub use blend::{BlendState, FinalPrediction, PriceBlender};
pub use classify::{ClassifiedArticle, Classifier, SeenIds, SeenStore};
pub use crate::core::{Backoff, NepseClient, NepseClientBuilder, NepseError, RetryConfig};
pub use credibility::{CredibilityStat, CredibilityStore, CredibilityTracker, Direction};
pub use entities::{Entity, EntityDictionary};
pub use history::{Candle, HistoryBuilder};
pub use matcher::{CompanyMatch, CompanyMatcher, MatchKind};
pub use news::{Article, NewsBuilder, NewsPage};
pub use pipeline::{Pipeline, PipelineConfig};
pub use sentiment::{GoogleTranslator, SentimentRecord, SentimentScorer, Translator};
pub use trend::{MovingAverageRegression, TrendEstimator, TrendForecast};
