use std::sync::Arc;

use nepse_sentiment::classify::SOURCE_LABEL;
use nepse_sentiment::{Classifier, CompanyMatcher, SeenIds, SeenStore};

use crate::common::article;

fn classifier() -> Classifier {
    Classifier::with_memory(CompanyMatcher::nepse().unwrap())
}

#[test]
fn classified_at_most_once() {
    let c = classifier();
    let a = article("A1", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "https://example.com/a1", "2025-07-01");

    let first = c.classify(&a).expect("first call classifies");
    assert_eq!(first.symbol, "NABIL");
    assert_eq!(first.matched_company, "Nabil Bank Limited");
    assert_eq!(first.match_score, 100);
    assert_eq!(first.source, SOURCE_LABEL);
    assert_eq!(first.article, a);

    assert!(c.classify(&a).is_none());
    assert_eq!(c.seen().len(), 1);
}

#[test]
fn unmatched_articles_stay_retryable() {
    let c = classifier();
    let a = article("B7", "सुनको भाउ घट्यो", "", "", "2025-07-01");
    assert!(c.classify(&a).is_none());
    assert!(c.seen().is_empty());
    assert!(!c.seen().contains("B7"));
}

#[test]
fn empty_ids_are_rejected() {
    let c = classifier();
    let a = article("  ", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01");
    assert!(c.classify(&a).is_none());
    assert!(c.seen().is_empty());
}

#[test]
fn media_url_is_not_matched() {
    let c = classifier();
    let a = article("C1", "market closes flat", "", "https://news.example/नबिल", "2025-07-01");
    assert!(c.classify(&a).is_none());
}

#[test]
fn summary_participates_in_matching() {
    let c = classifier();
    let a = article("C2", "Banking update", "एभरेष्ट बैंकको नाफा बढ्यो", "", "2025-07-01");
    assert_eq!(c.classify(&a).unwrap().symbol, "EBL");
}

#[test]
fn seeded_store_blocks_known_ids() {
    let seen: Arc<dyn SeenStore> = Arc::new(SeenIds::from_ids(["A1"]));
    let c = Classifier::new(CompanyMatcher::nepse().unwrap(), seen);
    let a = article("A1", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01");
    assert!(c.classify(&a).is_none());

    c.seen().clear();
    assert!(c.classify(&a).is_some());
}
