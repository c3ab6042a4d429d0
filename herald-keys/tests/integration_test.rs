//! Integration tests for herald-keys

use herald_events::{EventService, EventServiceBuilder, EventServiceError, Handler};
use herald_keys::{EventKind, EventServiceExt, event_kinds};
use std::sync::{Arc, Mutex};

event_kinds! {
    pub enum LevelEvent {
        None,
        UserClickedForward,
        UserShot,
        LevelStarted,
        LevelFinished,
        ScoreChanged,
        Died,
    }
}

fn quiet() -> EventService {
    EventServiceBuilder::new().enable_logging(false).build()
}

#[test]
fn test_named_calls_forward_to_integer_keys() {
    let service = quiet();
    let scores = Arc::new(Mutex::new(Vec::new()));

    let sink = scores.clone();
    let on_score = Handler::new(move |score: &i64| sink.lock().unwrap().push(*score));
    service.register_event(LevelEvent::ScoreChanged, &on_score);

    // Same registration is reachable by raw key
    assert!(service.contains(5, &on_score));

    service.broadcast_event(LevelEvent::ScoreChanged, (150i64,)).unwrap();
    service.broadcast(5, (200i64,)).unwrap();
    assert_eq!(*scores.lock().unwrap(), vec![150, 200]);

    assert!(service.unregister_event(LevelEvent::ScoreChanged, &on_score));
    assert!(!service.has_handlers(LevelEvent::ScoreChanged));
}

#[test]
fn test_core_accepts_keys_outside_the_named_set() {
    let service = quiet();
    let handler = Handler::new(|| {});

    service.register(999, &handler);
    assert_eq!(LevelEvent::from_key(999.into()), None);
    assert!(service.broadcast(999, ()).is_ok());
}

#[test]
fn test_named_mismatch_reports_key() {
    let service = quiet();
    service.register_event(LevelEvent::Died, &Handler::new(|_: &String| {}));

    let err = service.broadcast_event(LevelEvent::Died, ()).unwrap_err();
    assert!(matches!(err, EventServiceError::SignatureMismatch { .. }));
    assert_eq!(err.key(), LevelEvent::Died.key());
}

#[test]
fn test_all_variants_are_distinct_keys() {
    let mut keys: Vec<_> = LevelEvent::ALL.iter().map(|kind| kind.key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), LevelEvent::ALL.len());
    assert_eq!(LevelEvent::LevelFinished.to_string(), "LevelFinished");
}
