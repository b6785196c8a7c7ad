/*!
 * Tests for the batch dispatcher
 */

use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;

use truelist_mcp::errors::ValidationError;
use truelist_mcp::verification::{BatchValidator, EmailState};

use crate::common::mock_verifier::{MockErrorType, MockVerifier};

const BATCH_SIZE: usize = 5;
const BATCH_DELAY: Duration = Duration::from_millis(600);

fn emails(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("user{}@example.com", i)).collect()
}

fn validator(verifier: Arc<MockVerifier>) -> BatchValidator {
    BatchValidator::new(verifier, BATCH_SIZE, BATCH_DELAY)
}

/// Order preservation across a partial trailing group
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withSixEmails_shouldPreserveInputOrder() {
    let verifier = Arc::new(MockVerifier::new());
    let input = vec![
        "a@x.com".to_string(),
        "b@x.com".to_string(),
        "c@x.com".to_string(),
        "d@x.com".to_string(),
        "e@x.com".to_string(),
        "f@x.com".to_string(),
    ];

    let outcomes = assert_ok!(validator(verifier.clone()).validate_batch(&input).await);

    assert_eq!(outcomes.len(), input.len());
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.email, input[i]);
        assert_eq!(outcome.state, EmailState::Ok);
        assert!(outcome.is_valid);
        assert!(outcome.error.is_none());
    }
    assert_eq!(verifier.call_count(), 6);
}

/// Inter-group suspension is (groups - 1) * delay, independent of call latency
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withTwelveEmails_shouldSleepBetweenGroupsOnly() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(12); // 3 groups of 5, 5, 2

    let start = tokio::time::Instant::now();
    let outcomes = validator(verifier)
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert_eq!(outcomes.len(), 12);
    assert_eq!(start.elapsed(), BATCH_DELAY * 2);
}

/// Calls within a group run concurrently, so group latency is the slowest
/// call, not the sum of all calls
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withSlowCalls_shouldFanOutWithinGroups() {
    let verifier = Arc::new(MockVerifier::new());
    verifier.set_call_delay(Duration::from_millis(100));
    let input = emails(12); // 3 groups

    let start = tokio::time::Instant::now();
    let outcomes = validator(verifier)
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert_eq!(outcomes.len(), 12);
    // 3 groups x 100ms latency each + 2 inter-group delays
    assert_eq!(
        start.elapsed(),
        Duration::from_millis(100) * 3 + BATCH_DELAY * 2
    );
}

/// A single group never sleeps
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withFewerThanGroupSize_shouldNotSleep() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(3);

    let start = tokio::time::Instant::now();
    validator(verifier.clone())
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(verifier.call_count(), 3);
}

/// Maximum batch is exactly ten full groups with no trailing partial
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withFiftyEmails_shouldRunTenFullGroups() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(50);

    let start = tokio::time::Instant::now();
    let outcomes = validator(verifier.clone())
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert_eq!(outcomes.len(), 50);
    assert_eq!(verifier.call_count(), 50);
    assert_eq!(start.elapsed(), BATCH_DELAY * 9);

    // Groups are dispatched in input order
    let tracker = verifier.tracker();
    let guard = tracker.lock().unwrap();
    let seen = &guard.emails_seen;
    let mut sorted_groups: Vec<String> = Vec::with_capacity(50);
    for chunk in seen.chunks(BATCH_SIZE) {
        let mut group = chunk.to_vec();
        group.sort();
        sorted_groups.extend(group);
    }
    let mut expected = emails(50);
    for chunk in expected.chunks_mut(BATCH_SIZE) {
        chunk.sort();
    }
    assert_eq!(sorted_groups, expected);
}

/// Empty input is rejected before any remote call
#[tokio::test]
async fn test_validate_batch_withEmptyInput_shouldRejectWithoutCalls() {
    let verifier = Arc::new(MockVerifier::new());
    let result = validator(verifier.clone()).validate_batch(&[]).await;

    assert!(matches!(result, Err(ValidationError::EmptyBatch)));
    assert_eq!(verifier.call_count(), 0);
}

/// Oversized input is rejected before any remote call
#[tokio::test]
async fn test_validate_batch_withFiftyOneEmails_shouldRejectWithoutCalls() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(51);

    let result = validator(verifier.clone()).validate_batch(&input).await;

    assert!(matches!(
        result,
        Err(ValidationError::BatchTooLarge { count: 51, max: 50 })
    ));
    assert_eq!(verifier.call_count(), 0);
}

/// One malformed address prevents the whole batch from starting
#[tokio::test]
async fn test_validate_batch_withMalformedAddress_shouldRejectWholeBatch() {
    let verifier = Arc::new(MockVerifier::new());
    let input = vec![
        "good@example.com".to_string(),
        "not-an-email".to_string(),
        "also-good@example.com".to_string(),
    ];

    let result = validator(verifier.clone()).validate_batch(&input).await;

    match result {
        Err(ValidationError::InvalidEmail(email)) => assert_eq!(email, "not-an-email"),
        other => panic!("Expected InvalidEmail, got {:?}", other),
    }
    assert_eq!(verifier.call_count(), 0);
}

/// A failing call only affects its own slot
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withOneFailingCall_shouldIsolateFailure() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(7);
    verifier.fail_for("user3@example.com", MockErrorType::Connection);

    let outcomes = validator(verifier.clone())
        .validate_batch(&input)
        .await
        .expect("batch should succeed despite the per-item failure");

    assert_eq!(outcomes.len(), 7);

    let failed = &outcomes[3];
    assert_eq!(failed.email, "user3@example.com");
    assert_eq!(failed.state, EmailState::Unknown);
    assert_eq!(failed.sub_state, "unknown_error");
    assert!(!failed.is_valid);
    assert!(failed.error.as_deref().is_some_and(|e| !e.is_empty()));

    for (i, outcome) in outcomes.iter().enumerate() {
        if i != 3 {
            assert_eq!(outcome.state, EmailState::Ok, "index {} should be unaffected", i);
            assert!(outcome.error.is_none());
        }
    }
    assert_eq!(verifier.call_count(), 7);
}

/// A failure in one group does not stop later groups
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withFailureInFirstGroup_shouldContinueLaterGroups() {
    let verifier = Arc::new(MockVerifier::new());
    let input = emails(10);
    verifier.fail_for("user0@example.com", MockErrorType::Api);

    let outcomes = validator(verifier.clone())
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert!(!outcomes[0].is_valid);
    assert!(outcomes[0].error.is_some());
    assert!(outcomes[5..].iter().all(|o| o.is_valid));
    assert_eq!(verifier.call_count(), 10);
}

/// Duplicate addresses each get their own independent outcome
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withDuplicates_shouldValidateEachOccurrence() {
    let verifier = Arc::new(MockVerifier::new());
    let input = vec![
        "dup@example.com".to_string(),
        "other@example.com".to_string(),
        "dup@example.com".to_string(),
    ];

    let outcomes = validator(verifier.clone())
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert_eq!(outcomes[0].email, "dup@example.com");
    assert_eq!(outcomes[2].email, "dup@example.com");
    assert_eq!(outcomes[0], outcomes[2]);
    assert_eq!(verifier.call_count(), 3);
}

/// Mixed states map onto per-outcome validity flags
#[tokio::test(start_paused = true)]
async fn test_validate_batch_withMixedStates_shouldReportPerAddressValidity() {
    let verifier = Arc::new(MockVerifier::new());
    verifier.set_state("bad@example.com", EmailState::EmailInvalid);
    verifier.set_state("maybe@example.com", EmailState::Risky);
    let input = vec![
        "good@example.com".to_string(),
        "bad@example.com".to_string(),
        "maybe@example.com".to_string(),
    ];

    let outcomes = validator(verifier)
        .validate_batch(&input)
        .await
        .expect("batch should succeed");

    assert!(outcomes[0].is_valid);
    assert_eq!(outcomes[1].state, EmailState::EmailInvalid);
    assert!(!outcomes[1].is_valid);
    assert_eq!(outcomes[2].state, EmailState::Risky);
    assert!(!outcomes[2].is_valid);
}
