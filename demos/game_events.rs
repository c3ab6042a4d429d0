//! Game Events Example
//!
//! Registers a few handlers on the process-wide event service and fires the
//! matching broadcasts, including one with the wrong payload types.
//!
//! Run with: `cargo run --example game_events`
//! More output: `HERALD_LOG_LEVEL=debug cargo run --example game_events`

use herald::event_kinds;
use herald::prelude::*;
use tracing::{error, info};

event_kinds! {
    /// Events raised during a level
    pub enum GameEvent {
        None,
        EnemyDied,
        BoosterUsed,
        ScreenTapped,
        LevelFinished,
    }
}

fn enemy_died(enemy_name: &String) {
    info!("Enemy died. Enemy name: {}", enemy_name);
}

fn booster_used(booster_name: &String) {
    info!("Booster used. Booster name: {}", booster_name);
}

fn screen_tapped(x: &f32, y: &f32) {
    info!("Screen tapped at position: {}, {}", x, y);
}

fn main() {
    herald::herald_log::init();

    let events = EventService::instance();

    // Register sample events
    let on_enemy_died = Handler::new(enemy_died);
    let on_booster_used = Handler::new(booster_used);
    let on_screen_tapped = Handler::new(screen_tapped);

    events.register_event(GameEvent::EnemyDied, &on_enemy_died);
    events.register_event(GameEvent::BoosterUsed, &on_booster_used);
    events.register_event(GameEvent::ScreenTapped, &on_screen_tapped);

    // Broadcast sample events
    let results = [
        events.broadcast_event(GameEvent::EnemyDied, ("The Giant".to_string(),)),
        events.broadcast_event(GameEvent::BoosterUsed, ("Potion".to_string(),)),
        events.broadcast_event(GameEvent::ScreenTapped, (100.0f32, 550.0f32)),
        // Integers instead of floats: reported, handler not called
        events.broadcast_event(GameEvent::ScreenTapped, (100, 550)),
        // Nobody listens: nothing happens
        events.broadcast_event(GameEvent::LevelFinished, ()),
    ];

    for result in results {
        if let Err(e) = result {
            error!("Broadcast failed: {}", e);
        }
    }

    events.unregister_event(GameEvent::BoosterUsed, &on_booster_used);
    info!(
        "Handlers still registered: {:?}",
        events
            .keys()
            .into_iter()
            .filter_map(GameEvent::from_key)
            .collect::<Vec<_>>()
    );
}
