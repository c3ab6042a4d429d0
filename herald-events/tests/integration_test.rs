//! Integration tests for herald-events

use herald_events::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

fn quiet() -> EventService {
    EventServiceBuilder::new().enable_logging(false).build()
}

#[test]
fn test_end_to_end_potion() {
    let service = EventService::new();
    let recorded = Arc::new(Mutex::new(Vec::new()));

    let sink = recorded.clone();
    service.register(
        1,
        &Handler::new(move |name: &String| sink.lock().unwrap().push(name.clone())),
    );
    service.broadcast(1, ("Potion".to_string(),)).unwrap();

    assert_eq!(*recorded.lock().unwrap(), vec!["Potion".to_string()]);
}

#[test]
fn test_type_isolation_across_keys() {
    let service = quiet();
    let strings = Arc::new(AtomicU32::new(0));
    let taps = Arc::new(AtomicU32::new(0));

    let s = strings.clone();
    service.register(
        10,
        &Handler::new(move |_: &String| {
            s.fetch_add(1, Ordering::SeqCst);
        }),
    );
    let t = taps.clone();
    service.register(
        11,
        &Handler::new(move |_: &f32, _: &f32| {
            t.fetch_add(1, Ordering::SeqCst);
        }),
    );

    service.broadcast(10, ("The Giant".to_string(),)).unwrap();

    assert_eq!(strings.load(Ordering::SeqCst), 1);
    assert_eq!(taps.load(Ordering::SeqCst), 0);
}

#[test]
fn test_arity_discrimination_in_either_order() {
    for one_arg_first in [true, false] {
        let service = quiet();
        let one = Arc::new(AtomicU32::new(0));
        let two = Arc::new(AtomicU32::new(0));

        let o = one.clone();
        let single = Handler::new(move |_: &f32| {
            o.fetch_add(1, Ordering::SeqCst);
        });
        let t = two.clone();
        let pair = Handler::new(move |_: &f32, _: &f32| {
            t.fetch_add(1, Ordering::SeqCst);
        });

        if one_arg_first {
            service.register(2, &single);
            service.register(2, &pair);
        } else {
            service.register(2, &pair);
            service.register(2, &single);
        }

        let err = service.broadcast(2, (1.0f32, 2.0f32)).unwrap_err();
        assert!(matches!(err, EventServiceError::SignatureMismatch { .. }));
        assert_eq!(one.load(Ordering::SeqCst), 0);
        assert_eq!(two.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_unregister_with_wrong_signature_is_noop() {
    let service = quiet();
    let handler = Handler::new(|_: &String| {});
    let lookalike = Handler::new(|_: &String, _: &String| {});

    service.register(1, &handler);
    assert!(!service.unregister(1, &lookalike));
    assert!(service.contains(1, &handler));
}

#[test]
fn test_reentrant_register_waits_for_next_broadcast() {
    let service = quiet();
    let late_calls = Arc::new(AtomicU32::new(0));

    let late = {
        let calls = late_calls.clone();
        Handler::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    let inner = service.clone();
    let adder = Handler::new(move || inner.register(1, &late));
    service.register(1, &adder);

    service.broadcast(1, ()).unwrap();
    assert_eq!(late_calls.load(Ordering::SeqCst), 0);
    assert_eq!(service.handler_count(1), 2);

    service.broadcast(1, ()).unwrap();
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reentrant_unregister_does_not_affect_inflight_broadcast() {
    let service = quiet();
    let calls = Arc::new(AtomicU32::new(0));

    let c = calls.clone();
    let victim = Handler::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });

    let inner = service.clone();
    let target = victim.clone();
    let remover = Handler::new(move || {
        inner.unregister(1, &target);
    });

    service.register(1, &remover);
    service.register(1, &victim);

    service.broadcast(1, ()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    service.broadcast(1, ()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_nested_broadcast() {
    let service = quiet();
    let received = Arc::new(Mutex::new(Vec::new()));

    let sink = received.clone();
    service.register(
        20,
        &Handler::new(move |score: &u32| sink.lock().unwrap().push(*score)),
    );

    let inner = service.clone();
    service.register(
        21,
        &Handler::new(move |score: &u32| -> HandlerResult {
            inner
                .broadcast(20, (score * 2,))
                .map_err(HandlerError::other)
        }),
    );

    service.broadcast(21, (21u32,)).unwrap();
    assert_eq!(*received.lock().unwrap(), vec![42]);
}

#[test]
fn test_four_argument_payload() {
    let service = quiet();
    let seen = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    service.register(
        30,
        &Handler::new(move |id: &u64, name: &String, x: &f32, alive: &bool| {
            *sink.lock().unwrap() = Some((*id, name.clone(), *x, *alive));
        }),
    );

    service
        .broadcast(30, (7u64, "Goblin".to_string(), 1.5f32, false))
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        Some((7, "Goblin".to_string(), 1.5, false))
    );
}

#[test]
fn test_concurrent_register_and_broadcast() {
    let service = quiet();
    let calls = Arc::new(AtomicU32::new(0));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let service = &service;
            let calls = calls.clone();
            scope.spawn(move || {
                for _ in 0..25 {
                    let c = calls.clone();
                    service.register(
                        1,
                        &Handler::new(move |_: &i64| {
                            c.fetch_add(1, Ordering::SeqCst);
                        }),
                    );
                    service.broadcast(1, (0i64,)).unwrap();
                }
            });
        }
    });

    assert_eq!(service.handler_count(1), 100);

    let before = calls.load(Ordering::SeqCst);
    service.broadcast(1, (0i64,)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst) - before, 100);
}

#[test]
fn test_config_from_env() {
    unsafe {
        std::env::set_var(config::ENV_CONTINUE_ON_ERROR, "true");
        std::env::set_var(config::ENV_ENABLE_LOGGING, "0");
    }

    let loaded = EventServiceConfig::from_env();
    assert!(loaded.continue_on_error);
    assert!(!loaded.enable_logging);

    // Cleanup
    unsafe {
        std::env::remove_var(config::ENV_CONTINUE_ON_ERROR);
        std::env::remove_var(config::ENV_ENABLE_LOGGING);
    }
}
