use nepse_sentiment::SentimentScorer;

#[tokio::test]
async fn empty_and_missing_text_score_exactly_zero() {
    let s = SentimentScorer::new();
    assert_eq!(s.score(None).await, 0.0);
    assert_eq!(s.score(Some("")).await, 0.0);
    assert_eq!(s.score(Some(" \n\t ")).await, 0.0);
    assert_eq!(s.score_article("", "  ").await, 0.0);
}

#[tokio::test]
async fn english_text_is_scored_directly_and_bounded() {
    let s = SentimentScorer::new();
    let good = s.score(Some("Record profit, excellent growth and a great dividend")).await;
    let bad = s.score(Some("Terrible losses, fraud and a horrible collapse")).await;
    assert!(good > 0.0 && good <= 1.0, "{good}");
    assert!((-1.0..0.0).contains(&bad), "{bad}");
}

#[tokio::test]
async fn article_score_combines_title_and_summary() {
    let s = SentimentScorer::new();
    let combined = s.score_article("Bank update", "excellent results").await;
    let direct = s.score(Some("Bank update excellent results")).await;
    assert_eq!(combined, direct);
    assert!(combined > 0.0);
}
