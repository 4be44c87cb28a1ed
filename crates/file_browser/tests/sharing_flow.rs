//! End-to-end sharing-dialog scenarios: seeding, permission moves, the
//! debounced user lookup, and the close/submit policy.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use file_browser::ShareDialog;
use storage_api::{SharePermission, SharedFolder, StorageApi};

fn folder_with(readers: Vec<storage_api::LookupUser>, writers: Vec<storage_api::LookupUser>) -> SharedFolder {
    SharedFolder {
        id: "bucket-7".to_string(),
        name: "design-assets".to_string(),
        readers,
        writers,
    }
}

fn dialog(mock: &Arc<MockStorage>) -> ShareDialog {
    let client: Arc<dyn StorageApi> = mock.clone();
    let (dialog, _events) = ShareDialog::new(client);
    dialog
}

#[test]
fn test_move_reader_to_writer_and_close_sends_one_update() {
    let mock = MockStorage::new();
    let dialog = dialog(&mock);
    let u1 = user("u1");
    let u2 = user("u2");
    dialog.open(&folder_with(vec![u1.clone()], vec![u2.clone()]));
    assert!(!dialog.is_dirty());

    dialog.move_permission(u1.uuid, SharePermission::Write);
    assert!(dialog.is_dirty());
    assert!(dialog.readers().is_empty());
    let writer_ids: Vec<_> = dialog.writers().iter().map(|u| u.uuid).collect();
    assert!(writer_ids.contains(&u1.uuid) && writer_ids.contains(&u2.uuid));

    assert!(dialog.close());
    assert!(wait_for(|| {
        mock.calls().iter().any(|c| {
            matches!(c, RecordedCall::UpdateSharedFolder { folder_id, readers, writers }
                if folder_id == "bucket-7" && readers.is_empty() && writers.len() == 2)
        })
    }));
    assert_eq!(
        mock.count_calls(|c| matches!(c, RecordedCall::UpdateSharedFolder { .. })),
        1
    );
}

#[test]
fn test_close_without_changes_makes_no_call() {
    let mock = MockStorage::new();
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![user("u1")], vec![]));

    assert!(!dialog.close());
    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(
        mock.count_calls(|c| matches!(c, RecordedCall::UpdateSharedFolder { .. })),
        0
    );
}

#[test]
fn test_lookup_burst_dispatches_last_query_once() {
    let mock = MockStorage::new();
    mock.set_lookup_results(vec![user("alice")]);
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![], vec![]));

    dialog.on_query_change("a");
    dialog.on_query_change("al");
    dialog.on_query_change("ali");

    assert!(wait_for(|| !dialog.suggestions().is_empty()));
    std::thread::sleep(Duration::from_millis(500));

    let lookups: Vec<_> = mock
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            RecordedCall::LookupUser(q) => Some(q),
            _ => None,
        })
        .collect();
    assert_eq!(lookups, vec!["ali".to_string()]);
    assert!(!dialog.is_lookup_loading());
}

#[test]
fn test_selecting_suggestion_adds_at_pending_level() {
    let mock = MockStorage::new();
    let alice = user("alice");
    mock.set_lookup_results(vec![alice.clone()]);
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![], vec![]));

    dialog.set_pending_permission(SharePermission::Write);
    dialog.on_query_change("alice");
    assert!(wait_for(|| !dialog.suggestions().is_empty()));

    dialog.select_suggestion(alice.clone());
    assert!(dialog.is_dirty());
    assert!(dialog.suggestions().is_empty());
    assert_eq!(dialog.writers().first().map(|u| u.uuid), Some(alice.uuid));
    assert!(dialog.readers().is_empty());
}

#[test]
fn test_remove_user_marks_dirty_and_updates_on_close() {
    let mock = MockStorage::new();
    let dialog = dialog(&mock);
    let u1 = user("u1");
    dialog.open(&folder_with(vec![u1.clone()], vec![]));

    dialog.remove_user(u1.uuid);
    assert!(dialog.is_dirty());
    assert!(dialog.close());

    assert!(wait_for(|| {
        mock.calls().iter().any(|c| {
            matches!(c, RecordedCall::UpdateSharedFolder { readers, writers, .. }
                if readers.is_empty() && writers.is_empty())
        })
    }));
}

#[test]
fn test_reopen_reseeds_and_does_not_leak_state() {
    let mock = MockStorage::new();
    let dialog = dialog(&mock);
    let u1 = user("u1");
    let u2 = user("u2");

    dialog.open(&folder_with(vec![u1.clone()], vec![]));
    dialog.move_permission(u1.uuid, SharePermission::Write);
    dialog.close();

    // a different folder: the previous instance's sets must not merge in
    dialog.open(&folder_with(vec![], vec![u2.clone()]));
    assert!(!dialog.is_dirty());
    assert!(dialog.readers().is_empty());
    assert_eq!(dialog.writers().iter().map(|u| u.uuid).collect::<Vec<_>>(), vec![u2.uuid]);
}

#[test]
fn test_late_lookup_response_after_close_is_ignored() {
    let mock = MockStorage::new();
    mock.set_lookup_results(vec![user("alice")]);
    mock.set_response_delay(Duration::from_millis(100));
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![], vec![]));

    dialog.on_query_change("alice");
    // wait for the debounce to dispatch, then close while in flight
    assert!(wait_for(|| {
        mock.count_calls(|c| matches!(c, RecordedCall::LookupUser(_))) == 1
    }));
    dialog.close();

    std::thread::sleep(Duration::from_millis(300));
    assert!(dialog.suggestions().is_empty());
    assert!(!dialog.is_lookup_loading());
}

#[test]
fn test_clearing_query_invalidates_in_flight_lookup() {
    let mock = MockStorage::new();
    mock.set_lookup_results(vec![user("alice")]);
    mock.set_response_delay(Duration::from_millis(100));
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![], vec![]));

    dialog.on_query_change("alice");
    assert!(wait_for(|| {
        mock.count_calls(|c| matches!(c, RecordedCall::LookupUser(_))) == 1
    }));
    // the user erases the input while the lookup is still in flight
    dialog.on_query_change("");
    assert!(!dialog.is_lookup_loading());

    std::thread::sleep(Duration::from_millis(300));
    assert!(dialog.suggestions().is_empty());
    assert!(!dialog.is_lookup_loading());
}

#[test]
fn test_selecting_suggestion_invalidates_in_flight_lookup() {
    let mock = MockStorage::new();
    let alice = user("alice");
    mock.set_lookup_results(vec![alice.clone()]);
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![], vec![]));

    // a refining keystroke goes out while the suggestion is being picked
    mock.set_response_delay(Duration::from_millis(100));
    dialog.on_query_change("alic");
    assert!(wait_for(|| {
        mock.count_calls(|c| matches!(c, RecordedCall::LookupUser(_))) == 1
    }));
    dialog.select_suggestion(alice.clone());
    assert!(dialog.suggestions().is_empty());

    std::thread::sleep(Duration::from_millis(300));
    assert!(dialog.suggestions().is_empty());
    assert!(!dialog.is_lookup_loading());
    assert_eq!(dialog.readers().first().map(|u| u.uuid), Some(alice.uuid));
}

#[test]
fn test_links_touched_alone_sends_no_permission_update() {
    let mock = MockStorage::new();
    let dialog = dialog(&mock);
    dialog.open(&folder_with(vec![user("u1")], vec![]));

    dialog.mark_links_touched();
    assert!(dialog.links_touched());
    assert!(!dialog.close());

    std::thread::sleep(Duration::from_millis(150));
    assert_eq!(
        mock.count_calls(|c| matches!(c, RecordedCall::UpdateSharedFolder { .. })),
        0
    );
}
