use nepse_sentiment::SentimentScorer;
use nepse_sentiment::sentiment::{clean_social_text, normalize_whitespace};

#[tokio::test]
async fn reposts_are_dropped() {
    let s = SentimentScorer::new();
    assert_eq!(s.score_social("RT @broker: great results!").await, None);
}

#[tokio::test]
async fn links_and_tags_do_not_affect_the_score() {
    let s = SentimentScorer::new();
    let noisy = s
        .score_social("Great results @nabilbank #NEPSE https://t.co/abc www.example.com/x")
        .await
        .unwrap();
    let clean = s.score(Some("Great results")).await;
    assert_eq!(noisy, clean);
}

#[tokio::test]
async fn a_post_that_is_only_links_is_neutral() {
    let s = SentimentScorer::new();
    assert_eq!(s.score_social("https://t.co/abc #NEPSE").await, Some(0.0));
}

#[test]
fn whitespace_is_collapsed() {
    assert_eq!(normalize_whitespace("  a \n b\t\tc  "), "a b c");
    assert_eq!(clean_social_text("@a  hi   #b"), "hi");
}
