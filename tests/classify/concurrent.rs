use nepse_sentiment::{Classifier, CompanyMatcher};

use crate::common::article;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn duplicate_ids_in_one_batch_emit_once() {
    let c = Classifier::with_memory(CompanyMatcher::nepse().unwrap());
    let batch: Vec<_> = (0..64)
        .map(|_| article("DUP", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01"))
        .collect();

    let out = c.classify_all(batch, 10).await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].article.id, "DUP");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_keeps_input_order_and_drops_unmatched() {
    let c = Classifier::with_memory(CompanyMatcher::nepse().unwrap());
    let batch = vec![
        article("1", "एभरेष्ट बैंकको नाफा बढ्यो", "", "", "2025-07-01"),
        article("2", "सुनको भाउ घट्यो", "", "", "2025-07-01"),
        article("3", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01"),
        article("4", "एनआईसी एसिया बैंकले लाभांश घोषणा गर्यो", "", "", "2025-07-01"),
    ];

    let out = c.classify_all(batch, 2).await;
    let got: Vec<(&str, &str)> = out
        .iter()
        .map(|c| (c.article.id.as_str(), c.symbol.as_str()))
        .collect();
    assert_eq!(got, vec![("1", "EBL"), ("3", "NABIL"), ("4", "NICA")]);

    // A second pass over the same ids emits nothing.
    let again = c
        .classify_all(vec![article("3", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01")], 2)
        .await;
    assert!(again.is_empty());
}

#[tokio::test]
async fn zero_workers_still_makes_progress() {
    let c = Classifier::with_memory(CompanyMatcher::nepse().unwrap());
    let out = c
        .classify_all(vec![article("9", "नबिल बैंकले नाफा वृद्धि गर्यो", "", "", "2025-07-01")], 0)
        .await;
    assert_eq!(out.len(), 1);
}
