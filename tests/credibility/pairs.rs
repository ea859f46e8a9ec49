use nepse_sentiment::credibility::PairOutcome;
use nepse_sentiment::{CredibilityStore, CredibilityTracker, Direction};

use Direction::{Negative, Neutral, Positive};

#[test]
fn one_agreeing_pair_gives_full_weight() {
    let mut t = CredibilityTracker::new(CredibilityStore::default());
    assert_eq!(t.update("example.com", Positive, Positive), None);
    assert_eq!(t.update("example.com", Positive, Positive), Some(PairOutcome::Correct));

    let store = t.finish();
    let stat = store.get("example.com").unwrap();
    assert_eq!((stat.correct, stat.incorrect, stat.total_pairs), (1, 0, 1));
    assert_eq!(stat.average_weight, 1.0);
    assert_eq!(store.weight("example.com"), 1.0);
}

#[test]
fn odd_article_out_is_ignored() {
    let mut t = CredibilityTracker::default();
    t.update("a.np", Positive, Positive);
    t.update("a.np", Negative, Negative);
    t.update("a.np", Positive, Negative);
    let store = t.finish();
    let stat = store.get("a.np").unwrap();
    assert_eq!(stat.total_pairs, 1);
    assert_eq!(stat.correct, 1);
}

#[test]
fn neutral_prediction_voids_the_pair_but_not_the_actual() {
    let mut t = CredibilityTracker::default();
    // A neutral actual move is fine as long as both predictions have a sign.
    t.update("a.np", Positive, Neutral);
    assert_eq!(t.update("a.np", Negative, Neutral), Some(PairOutcome::Correct));
    t.update("a.np", Neutral, Positive);
    assert_eq!(t.update("a.np", Positive, Positive), Some(PairOutcome::Skipped));
    assert_eq!(t.finish().get("a.np").unwrap().total_pairs, 1);
}

#[test]
fn weight_stays_in_unit_interval_and_is_zero_without_pairs() {
    let dirs = [Positive, Negative, Neutral];
    let mut t = CredibilityTracker::default();
    t.update("lonely.com", Positive, Positive);
    for i in 0..200usize {
        let p = dirs[(i * 7 + 1) % 3];
        let a = dirs[(i * 5 + 2) % 3];
        t.update("mixed.com", p, a);
        let w = t.weight("mixed.com");
        assert!((0.0..=1.0).contains(&w), "{w}");
    }
    let store = t.finish();
    assert_eq!(store.get("lonely.com").unwrap().total_pairs, 0);
    assert_eq!(store.weight("lonely.com"), 0.0);
    for (_, stat) in store.iter() {
        assert!((0.0..=1.0).contains(&stat.average_weight));
        assert_eq!(stat.correct + stat.incorrect, stat.total_pairs);
    }
}

#[test]
fn unseen_domain_weight_defaults() {
    let store = CredibilityStore::default();
    assert_eq!(store.weight("nowhere.np"), 0.0);
    assert_eq!(store.weight_or("nowhere.np", 0.5), 0.5);
}

#[test]
fn direction_labels() {
    assert_eq!(Direction::from_sentiment(0.2), Positive);
    assert_eq!(Direction::from_sentiment(-0.01), Negative);
    assert_eq!(Direction::from_sentiment(0.0), Neutral);
    assert_eq!(Direction::from_price_change(0.1, 0.1), Neutral);
    assert_eq!(Direction::from_price_change(-0.1, 0.1), Neutral);
    assert_eq!(Direction::from_price_change(0.11, 0.1), Positive);
    assert_eq!(Direction::from_price_change(-2.0, 0.1), Negative);
    assert_eq!(Positive.to_string(), "positive");
}
