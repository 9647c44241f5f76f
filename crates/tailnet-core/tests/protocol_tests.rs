//! Tests for the plan/preview/confirm/apply protocol

use tailnet_core::{ConfirmationProtocol, Error, Outcome, ProtocolOptions, TagRule};
use tailnet_test_utils::{Call, FakeDirectory, ScriptedReviewer, sample_fleet};

fn options(dry_run: bool, assume_yes: bool) -> ProtocolOptions {
    ProtocolOptions {
        dry_run,
        assume_yes,
    }
}

#[test]
fn test_nothing_affected_stops_after_preview() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(false, false));
    let mut reviewer = ScriptedReviewer::silent();

    let outcome = protocol.run(&TagRule::remove_all("x"), &mut reviewer).unwrap();

    assert!(matches!(outcome, Outcome::NothingAffected(_)));
    assert_eq!(reviewer.previews.len(), 1);
    assert_eq!(reviewer.prompts, 0);
    assert_eq!(directory.calls(), vec![Call::FetchAll]);
}

#[test]
fn test_dry_run_never_prompts_or_writes() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(true, false));
    let mut reviewer = ScriptedReviewer::silent();

    let outcome = protocol
        .run(&TagRule::rename("prod", "live"), &mut reviewer)
        .unwrap();

    assert!(matches!(outcome, Outcome::DryRun(ref plan) if plan.affected() == 2));
    assert_eq!(reviewer.prompts, 0);
    assert!(directory.updates().is_empty());
}

#[test]
fn test_dry_run_wins_over_yes() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(true, true));
    let mut reviewer = ScriptedReviewer::silent();

    let outcome = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap();

    assert!(matches!(outcome, Outcome::DryRun(_)));
    assert!(directory.updates().is_empty());
}

#[test]
fn test_declined_confirmation_cancels() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(false, false));
    let mut reviewer = ScriptedReviewer::answering(&[false]);

    let outcome = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap();

    assert!(matches!(outcome, Outcome::Cancelled(_)));
    assert_eq!(reviewer.prompts, 1);
    assert!(directory.updates().is_empty());
}

#[test]
fn test_accepted_confirmation_applies() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(false, false));
    let mut reviewer = ScriptedReviewer::answering(&[true]);

    let outcome = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap();

    let report = outcome.report().expect("rule should have been applied");
    assert_eq!(report.applied(), 2);
    assert_eq!(outcome.plan().affected(), 2);
    // plan fetch, then a second fetch for apply, then the writes
    assert_eq!(directory.calls()[..2], [Call::FetchAll, Call::FetchAll]);
    assert_eq!(directory.updates().len(), 2);
}

#[test]
fn test_yes_skips_prompt() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(false, true));
    let mut reviewer = ScriptedReviewer::silent();

    let outcome = protocol
        .run(&TagRule::add_if_missing("prod", "review"), &mut reviewer)
        .unwrap();

    assert!(matches!(outcome, Outcome::Applied { .. }));
    assert_eq!(reviewer.prompts, 0);
}

#[test]
fn test_plan_failure_is_fatal() {
    let directory = FakeDirectory::new(sample_fleet()).with_fetch_error("unauthorized");
    let protocol = ConfirmationProtocol::new(&directory, options(false, true));
    let mut reviewer = ScriptedReviewer::silent();

    let err = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(reviewer.previews.is_empty());
}

#[test]
fn test_set_tags_lookup_failure_is_fatal() {
    let directory = FakeDirectory::new(sample_fleet()).with_fetch_error("API returned 401");
    let protocol = ConfirmationProtocol::new(&directory, options(false, true));
    let mut reviewer = ScriptedReviewer::silent();

    let err = protocol
        .run(&TagRule::set_tags(["d1", "d2"], ["x"]), &mut reviewer)
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(reviewer.previews.is_empty());
    assert!(directory.updates().is_empty());
}

#[test]
fn test_prompt_error_propagates() {
    let directory = FakeDirectory::new(sample_fleet());
    let protocol = ConfirmationProtocol::new(&directory, options(false, false));
    // no scripted answers, so the prompt fails
    let mut reviewer = ScriptedReviewer::silent();

    let err = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap_err();

    assert!(matches!(err, Error::Interaction { .. }));
    assert!(directory.updates().is_empty());
}

#[test]
fn test_partial_apply_is_reported() {
    let directory = FakeDirectory::new(sample_fleet()).with_failing_update("d3");
    let protocol = ConfirmationProtocol::new(&directory, options(false, true));
    let mut reviewer = ScriptedReviewer::silent();

    let outcome = protocol
        .run(&TagRule::remove_all("prod"), &mut reviewer)
        .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.planned(), 2);
    assert_eq!(report.applied(), 1);
    assert!(!report.is_complete());
}
