//! Push → restart → query → execute flows over the file-backed store.

use crate::test_utils::*;
use redoubt_safemode::PushOutcome;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

const TTL: u64 = 10_000;

#[test]
fn test_push_survives_restart_and_executes_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");

    // IPC-receiving process applies the push
    {
        let controller = controller_at(&state_file, TTL);
        let outcome = controller
            .handle_push(
                OPERATOR_PACKAGE,
                &release_digest(),
                ids(&["reset_cache", "disable_gpu"]),
                1_000,
            )
            .unwrap();
        assert_eq!(outcome, PushOutcome::Applied);
    }

    // next process start: flag is already up before any slow-path query
    let controller = controller_at(&state_file, TTL);
    assert!(controller.is_enabled());

    let log = Arc::new(Mutex::new(Vec::new()));
    controller
        .register_actions(vec![
            LoggingAction::boxed("disable_gpu", true, &log),
            LoggingAction::boxed("reset_cache", true, &log),
            LoggingAction::boxed("untouched", true, &log),
        ])
        .unwrap();

    assert!(controller.execute_active_actions(2_000).unwrap());
    // registration order, not the requested set's alphabetical order
    assert_eq!(*log.lock().unwrap(), vec!["disable_gpu", "reset_cache"]);
}

#[test]
fn test_expiry_discovered_after_restart_heals_flag_and_disk() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");

    controller_at(&state_file, TTL)
        .handle_push(OPERATOR_PACKAGE, &release_digest(), ids(&["x"]), 1_000)
        .unwrap();

    let controller = controller_at(&state_file, TTL);
    assert!(controller.is_enabled());
    assert_eq!(controller.query_actions(1_000 + TTL), BTreeSet::new());
    assert!(!controller.is_enabled());
    assert!(!state_file.exists());

    // a third process sees nothing at all
    let controller = controller_at(&state_file, TTL);
    assert!(!controller.is_enabled());
}

#[test]
fn test_renewal_across_processes_extends_freshness() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");

    controller_at(&state_file, TTL)
        .handle_push(OPERATOR_PACKAGE, &release_digest(), ids(&["x"]), 1_000)
        .unwrap();
    controller_at(&state_file, TTL)
        .handle_push(OPERATOR_PACKAGE, &release_digest(), ids(&["x"]), 4_000)
        .unwrap();

    let controller = controller_at(&state_file, TTL);
    assert_eq!(controller.query_actions(1_000 + TTL), ids(&["x"]));
    assert_eq!(controller.query_actions(4_000 + TTL), BTreeSet::new());
}

#[test]
fn test_empty_push_disables_on_next_query() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");

    controller_at(&state_file, TTL)
        .handle_push(OPERATOR_PACKAGE, &release_digest(), ids(&["x"]), 1_000)
        .unwrap();
    controller_at(&state_file, TTL)
        .handle_push(OPERATOR_PACKAGE, &release_digest(), BTreeSet::new(), 2_000)
        .unwrap();

    let controller = controller_at(&state_file, TTL);
    assert!(controller.is_enabled());
    assert_eq!(controller.query_actions(2_001), BTreeSet::new());
    assert!(!controller.is_enabled());
}

#[test]
fn test_corrupted_state_file_reads_as_safe_mode_off() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");
    std::fs::write(&state_file, b"}} definitely not json").unwrap();

    let controller = controller_at(&state_file, TTL);
    assert_eq!(controller.query_actions(1_000), BTreeSet::new());
    assert!(!controller.is_enabled());
    // the bad file was cleared, not left to fail forever
    assert!(!state_file.exists());
}

#[test]
fn test_failing_action_reports_but_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("safe_mode.json");

    let controller = controller_at(&state_file, TTL);
    controller
        .handle_push(
            OPERATOR_PACKAGE,
            &release_digest(),
            ids(&["flaky", "solid"]),
            1_000,
        )
        .unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    controller
        .register_actions(vec![
            LoggingAction::boxed("flaky", false, &log),
            LoggingAction::boxed("solid", true, &log),
        ])
        .unwrap();

    assert!(!controller.execute_active_actions(1_500).unwrap());
    assert_eq!(*log.lock().unwrap(), vec!["flaky", "solid"]);
}
