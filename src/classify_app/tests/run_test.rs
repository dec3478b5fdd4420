use super::fixture::{result, Fixture, StubOutcome};
use crate::classify_app::core::Attempt;
use crate::classify_app::render::StatusLine;
use crate::display::interface::InputEvent;
use crate::history::record::ClassificationRecord;
use crate::history::store::HISTORY_STORAGE_KEY;
use crate::library::logger::interface::LogLevel;
use crate::storage::impl_memory::StorageMemory;
use crate::storage::interface::KeyValueStorage;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn stored_records(fixture: &Fixture) -> Option<Vec<ClassificationRecord>> {
    fixture
        .storage
        .get(HISTORY_STORAGE_KEY)
        .unwrap()
        .map(|json| serde_json::from_str(&json).unwrap())
}

#[test]
fn test_classifies_chosen_file() {
    let fixture = Fixture::new(StubOutcome::Success(result("plastic", 0.93)));
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    fixture
        .display
        .send(InputEvent::FileChosen(fixture.image_path.clone()));

    let screen = fixture
        .display
        .wait_for(TIMEOUT, |s| s.statistics.total == "1")
        .expect("statistics never updated");
    assert!(matches!(screen.status, StatusLine::Success(_)));
    assert_eq!(screen.statistics.most_common_class, "plastic");
    assert_eq!(screen.statistics.average_confidence, "93.0%");

    fixture.display.send(InputEvent::Quit);
    let model = running.join().unwrap().unwrap();

    assert!(matches!(model.attempt, Attempt::Succeeded { .. }));
    assert_eq!(fixture.image_classifier.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        fixture.image_classifier.last_base_url.lock().unwrap().as_deref(),
        Some("http://classifier.test")
    );

    let stored = stored_records(&fixture).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].class, "plastic");
    assert_eq!(stored[0].confidence, 0.93);
}

#[test]
fn test_celebrates_confident_result() {
    let fixture = Fixture::new(StubOutcome::Success(result("glass", 0.95)));
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    fixture
        .display
        .send(InputEvent::FileChosen(fixture.image_path.clone()));
    fixture
        .display
        .wait_for(TIMEOUT, |s| s.statistics.total == "1")
        .expect("statistics never updated");

    let deadline = std::time::Instant::now() + TIMEOUT;
    while fixture.display.celebrations() == 0 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(fixture.display.celebrations(), 1);

    fixture.display.send(InputEvent::Quit);
    running.join().unwrap().unwrap();
}

#[test]
fn test_server_error_leaves_history_alone() {
    let fixture = Fixture::new(StubOutcome::ServerError {
        status: 500,
        body: "model error".to_string(),
    });
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    fixture
        .display
        .send(InputEvent::FileChosen(fixture.image_path.clone()));

    let screen = fixture
        .display
        .wait_for(TIMEOUT, |s| matches!(s.status, StatusLine::Error(_)))
        .expect("failure never shown");
    assert_eq!(
        screen.status,
        StatusLine::Error("Error: Server error: 500 - model error".to_string())
    );
    assert!(screen.preview.is_some());

    fixture.display.send(InputEvent::Quit);
    running.join().unwrap().unwrap();

    assert_eq!(screen.statistics.total, "0");
    assert_eq!(stored_records(&fixture), None);
    assert_eq!(fixture.display.celebrations(), 0);
}

#[test]
fn test_stored_history_feeds_statistics_at_start() {
    let stored = vec![
        ClassificationRecord::new("paper", 0.6, Utc::now()),
        ClassificationRecord::new("paper", 0.8, Utc::now()),
        ClassificationRecord::new("metal", 1.0, Utc::now()),
    ];
    let storage = StorageMemory::with_entry(
        HISTORY_STORAGE_KEY,
        &serde_json::to_string(&stored).unwrap(),
    );
    let fixture = Fixture::with_storage(StubOutcome::Success(result("paper", 0.5)), storage);
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    let screen = fixture
        .display
        .wait_for(TIMEOUT, |s| s.statistics.total == "3")
        .expect("stored history never loaded");
    assert_eq!(screen.statistics.most_common_class, "paper");
    assert_eq!(screen.statistics.average_confidence, "80.0%");

    fixture.display.send(InputEvent::Quit);
    running.join().unwrap().unwrap();
}

#[test]
fn test_failed_persist_still_updates_statistics() {
    let fixture = Fixture::with_storage(
        StubOutcome::Success(result("metal", 0.4)),
        StorageMemory::failing_writes(),
    );
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    fixture
        .display
        .send(InputEvent::FileChosen(fixture.image_path.clone()));
    fixture
        .display
        .wait_for(TIMEOUT, |s| s.statistics.total == "1")
        .expect("statistics never updated");

    fixture.display.send(InputEvent::Quit);
    running.join().unwrap().unwrap();

    assert_eq!(fixture.history.lock().unwrap().records().len(), 1);
    assert!(fixture.logger.contains(LogLevel::Error, "could not persist history"));
}

#[test]
fn test_connection_probe_reports_success() {
    let fixture = Fixture::new(StubOutcome::Success(result("trash", 0.2)));
    let app = fixture.app.clone();
    let running = std::thread::spawn(move || app.run());

    fixture
        .display
        .send(InputEvent::ApiUrlChanged("http://elsewhere:9000".to_string()));
    fixture.display.send(InputEvent::TestConnection);

    let screen = fixture
        .display
        .wait_for(TIMEOUT, |s| matches!(s.connection, StatusLine::Success(_)))
        .expect("probe never finished");
    assert_eq!(screen.api_base_url, "http://elsewhere:9000");

    fixture.display.send(InputEvent::Quit);
    running.join().unwrap().unwrap();
}
