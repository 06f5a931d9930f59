//! Review flow tests: scheduling, mistake recording, due queue and stats.

mod common;

use chrono::Duration;
use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};

use spelling_core::{PatternType, MAX_INTERVAL_HOURS};
use spelling_practice_backend::error::ServiceError;
use spelling_practice_backend::services::study;

use common::{fixtures, TestContext};

/// Correct answer moves the word up one level with a jittered interval.
#[tokio::test]
async fn test_correct_review_advances_level() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["necessary"]).await;
    let word = ctx.word(list.id, "necessary").await;

    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, " Necessary ").await);

    assert!(result.correct);
    assert_eq!(result.srs_level, 1);
    assert!((7..=8).contains(&result.review_interval));
    assert_eq!(
        result.next_review,
        fixtures::start_time() + Duration::hours(result.review_interval)
    );
    assert!(result.mistake.is_none());
    assert!(result.mistake_patterns.is_empty());

    let stored = ctx.word(list.id, "necessary").await.to_core_state();
    assert_eq!(stored.practice_count, 1);
    assert_eq!(stored.correct_count, 1);
    assert_eq!(stored.last_practiced, Some(fixtures::start_time()));
}

/// Incorrect answer drops two levels and stores the classified mistake.
#[tokio::test]
async fn test_incorrect_review_records_pattern() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["running"]).await;
    let word = ctx.word(list.id, "running").await;
    ctx.set_word_column(word.id, "srs_level", 3).await;

    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "runing").await);

    assert!(!result.correct);
    assert_eq!(result.correct_spelling, "running");
    assert_eq!(result.srs_level, 1);

    let mistake = result.mistake.expect("mistake should be classified");
    assert_eq!(mistake.pattern_type, PatternType::Doubling);

    assert_eq!(result.mistake_patterns.len(), 1);
    let pattern = &result.mistake_patterns[0];
    assert_eq!(pattern.word_id, word.id);
    assert_eq!(pattern.word, "running");
    assert_eq!(pattern.description, mistake.description);
    assert_eq!(pattern.count, 1);
    assert_eq!(pattern.examples, vec!["runing".to_string()]);
}

/// Repeating the same misspelling counts twice but keeps one example.
#[tokio::test]
async fn test_repeated_mistake_increments_frequency() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["receive"]).await;
    let word = ctx.word(list.id, "receive").await;

    assert_ok!(study::submit_review(&ctx.state, 1, word.id, "recieve").await);
    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "recieve").await);

    assert_eq!(result.mistake_patterns.len(), 1);
    let pattern = &result.mistake_patterns[0];
    assert_eq!(pattern.pattern_type, PatternType::Phonetic);
    assert_eq!(pattern.count, 2);
    assert_eq!(pattern.examples, vec!["recieve".to_string()]);
    assert_eq!(ctx.count_rows("mistake_patterns").await, 1);
}

/// Words in someone else's list are invisible.
#[tokio::test]
async fn test_review_of_foreign_word_is_not_found() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["cat"]).await;
    let word = ctx.word(list.id, "cat").await;

    let err = assert_err!(study::submit_review(&ctx.state, 2, word.id, "cat").await);
    assert!(matches!(err, ServiceError::NotFound(_)));

    let unchanged = ctx.word(list.id, "cat").await;
    assert_eq!(unchanged.practice_count, 0);
}

/// New words become due once their first interval has passed.
#[tokio::test]
async fn test_due_words_after_interval() {
    let ctx = TestContext::new().await;
    ctx.create_list(1, &["apple", "banana", "cherry"]).await;

    let due = assert_ok!(study::due_words(&ctx.state, 1, None).await);
    assert!(due.is_empty());

    ctx.clock.advance(Duration::hours(5));
    let due = assert_ok!(study::due_words(&ctx.state, 1, None).await);
    assert_eq!(due.len(), 3);

    let limited = assert_ok!(study::due_words(&ctx.state, 1, Some(2)).await);
    assert_eq!(limited.len(), 2);

    let other_user = assert_ok!(study::due_words(&ctx.state, 2, None).await);
    assert!(other_user.is_empty());
}

/// Higher levels are reviewed first among due words.
#[tokio::test]
async fn test_due_words_prefer_higher_levels() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["apple", "banana"]).await;
    let banana = ctx.word(list.id, "banana").await;
    ctx.set_word_column(banana.id, "srs_level", 2).await;

    ctx.clock.advance(Duration::hours(5));
    let due = assert_ok!(study::due_words(&ctx.state, 1, None).await);

    let order: Vec<&str> = due.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(order, vec!["banana", "apple"]);
}

/// Familiarity needs practice count, accuracy and level together, and is lost again.
#[tokio::test]
async fn test_familiarity_is_gained_and_lost() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["rhythm"]).await;
    let word = ctx.word(list.id, "rhythm").await;

    for _ in 0..2 {
        let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "rhythm").await);
        assert!(!result.familiar);
    }

    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "rhythm").await);
    assert_eq!(result.srs_level, 3);
    assert!(result.familiar);

    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "rythm").await);
    assert_eq!(result.srs_level, 1);
    assert!(!result.familiar);
}

/// A stored level outside 0-5 is clamped before scheduling.
#[tokio::test]
async fn test_out_of_range_level_is_repaired() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["yacht"]).await;
    let word = ctx.word(list.id, "yacht").await;
    ctx.set_word_column(word.id, "srs_level", 9).await;
    ctx.set_word_column(word.id, "review_interval", 720).await;

    let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "yacht").await);

    assert_eq!(result.srs_level, 5);
    assert_eq!(result.review_interval, 1080);
}

/// Repeated correct answers at the top level stop growing at the interval cap.
#[tokio::test]
async fn test_mastered_word_interval_is_capped() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["mastered"]).await;
    let word = ctx.word(list.id, "mastered").await;
    ctx.set_word_column(word.id, "srs_level", 5).await;
    ctx.set_word_column(word.id, "review_interval", 720).await;

    for _ in 0..100 {
        let result = assert_ok!(study::submit_review(&ctx.state, 1, word.id, "mastered").await);
        assert_eq!(result.srs_level, 5);
        assert!(result.review_interval <= MAX_INTERVAL_HOURS);
    }

    let stored = ctx.word(list.id, "mastered").await.to_core_state();
    assert_eq!(stored.review_interval, MAX_INTERVAL_HOURS);
    assert_eq!(stored.practice_count, 100);
    assert_eq!(
        stored.next_review,
        Some(fixtures::start_time() + Duration::hours(MAX_INTERVAL_HOURS))
    );
}

/// User stats cover every level and count due words.
#[tokio::test]
async fn test_user_stats() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["apple", "banana", "cherry"]).await;
    let apple = ctx.word(list.id, "apple").await;
    let banana = ctx.word(list.id, "banana").await;

    assert_ok!(study::submit_review(&ctx.state, 1, apple.id, "apple").await);
    assert_ok!(study::submit_review(&ctx.state, 1, banana.id, "bananna").await);

    ctx.clock.advance(Duration::hours(5));
    let stats = assert_ok!(study::user_stats(&ctx.state, 1).await);

    assert_eq!(stats.total_words, 3);
    assert_eq!(stats.words_studied, 2);
    assert_eq!(stats.accuracy, 0.5);
    assert_eq!(stats.level_counts.len(), 6);
    assert_eq!(stats.level_counts[&0], 2);
    assert_eq!(stats.level_counts[&1], 1);
    // cherry is past its first interval, banana fell back to level 0 (about 4h)
    assert_eq!(stats.total_due, 2);
}

/// Pattern listing can be narrowed to one list.
#[tokio::test]
async fn test_mistake_patterns_filtered_by_list() {
    let ctx = TestContext::new().await;
    let first = ctx.create_list(1, &["receive"]).await;
    let second = ctx.create_list(1, &["running"]).await;
    let receive = ctx.word(first.id, "receive").await;
    let running = ctx.word(second.id, "running").await;

    assert_ok!(study::submit_review(&ctx.state, 1, receive.id, "recieve").await);
    assert_ok!(study::submit_review(&ctx.state, 1, receive.id, "recieve").await);
    assert_ok!(study::submit_review(&ctx.state, 1, running.id, "runing").await);

    let all = assert_ok!(study::mistake_patterns(&ctx.state, 1, None).await);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].word, "receive");
    assert_eq!(all[0].count, 2);

    let only_second = assert_ok!(study::mistake_patterns(&ctx.state, 1, Some(second.id)).await);
    assert_eq!(only_second.len(), 1);
    assert_eq!(only_second[0].word, "running");

    let stranger = assert_ok!(study::mistake_patterns(&ctx.state, 2, None).await);
    assert!(stranger.is_empty());
}

/// Resetting a word reinitializes its state but keeps its mistake history.
#[tokio::test]
async fn test_reset_word() {
    let ctx = TestContext::new().await;
    let list = ctx.create_list(1, &["receive"]).await;
    let word = ctx.word(list.id, "receive").await;
    for _ in 0..3 {
        assert_ok!(study::submit_review(&ctx.state, 1, word.id, "receive").await);
    }
    assert_ok!(study::submit_review(&ctx.state, 1, word.id, "recieve").await);

    ctx.clock.advance(Duration::hours(10));
    let err = assert_err!(study::reset_word(&ctx.state, 2, word.id).await);
    assert!(matches!(err, ServiceError::NotFound(_)));

    let state = assert_ok!(study::reset_word(&ctx.state, 1, word.id).await);
    assert_eq!(state.srs_level, 0);
    assert_eq!(state.practice_count, 0);

    let stored = ctx.word(list.id, "receive").await.to_core_state();
    assert_eq!(stored, state);
    assert_eq!(
        stored.next_review,
        Some(fixtures::start_time() + Duration::hours(14))
    );
    assert_eq!(ctx.count_rows("mistake_patterns").await, 1);
}
