//! Properties of the domain sample generators.

use crate::{config, expect_pass};
use genlab::report::length_event;
use genlab::samples::*;
use genlab::*;

/// Property: a correlated profile's bio is 35 characters per name character
pub fn test_profile_bio_follows_name() {
    let prop = for_all_named(profiles(), "profile", |profile: &Profile| {
        profile.bio.chars().count() == BIO_CHARS_PER_NAME_CHAR * profile.name.chars().count()
    })
    .classify("anonymous", |profile| profile.name.is_empty())
    .collect("name length", |profile| profile.name.chars().count() as f64);

    expect_pass("bio follows name", prop.run(&config()));
}

/// Property: independently drawn fields stay inside their bounds
pub fn test_independent_profile_bounds() {
    let prop = for_all_named(profile(), "profile", |profile: &Profile| {
        profile.name.chars().count() <= NAME_MAX_CHARS
            && (AGE_MIN..=AGE_MAX).contains(&profile.age)
            && profile.bio.chars().all(is_text_like)
    });

    expect_pass("independent profile bounds", prop.run(&config()));
}

/// Property: hands hold five cards of valid rank and suit
pub fn test_hands_are_well_formed() {
    let prop = for_all_named(hand(), "hand", |hand: &Hand| {
        hand.cards().len() == HAND_SIZE
            && hand.cards().iter().all(|card| {
                (RANK_MIN..=RANK_MAX).contains(&card.rank) && Suit::ALL.contains(&card.suit)
            })
    });

    expect_pass("hands well formed", prop.run(&config()));
}

/// A "no kings" claim shrinks to a lone king of clubs among aces of clubs
pub fn test_king_in_hand_shrinks() {
    let prop = for_all(hand(), |hand: &Hand| {
        hand.cards().iter().all(|card| card.rank != RANK_MAX)
    });

    match prop.run(&config()) {
        TestResult::Fail { counterexample, .. } => {
            assert_eq!(counterexample.matches("rank: 13").count(), 1);
            assert_eq!(counterexample.matches("rank: 1 }").count(), HAND_SIZE - 1);
            assert_eq!(counterexample.matches("suit: Clubs").count(), HAND_SIZE);
            println!("✓ No-kings claim shrank to {counterexample}");
        }
        result => panic!("Expected a king to be drawn, got: {result:?}"),
    }
}

/// Property: text_like only uses its alphabet
pub fn test_text_like_alphabet() {
    let prop = for_all_named(text_like(), "text", |text: &String| {
        text.chars().all(is_text_like)
    });

    expect_pass("text_like alphabet", prop.run(&config()));
}

/// Text lengths are reported as bucketed events
pub fn test_text_like_length_events() {
    let prop = for_all(text_like(), |text: &String| text.chars().all(is_text_like)).label(|text| {
        length_event("len", 10, text.chars().count()).unwrap_or_else(|error| error.to_string())
    });

    match prop.run(&config()) {
        TestResult::PassWithStatistics { statistics, .. } => {
            assert!(statistics.events.keys().all(|label| label.starts_with("len: ")));
            assert_eq!(statistics.events.values().sum::<usize>(), 100);
            println!("✓ Text length events reported");
        }
        result => panic!("Expected length statistics, got: {result:?}"),
    }
}

/// Property: the generated FIFO yields the drawn pairs in order
pub fn test_queue_is_fifo() {
    let prop = for_all_named(queue(), "queue", |sample: &QueueSample<(Value, Value)>| {
        sample.clone().drain() == sample.source
    });

    expect_pass("queue is FIFO", prop.run(&config()));
}
