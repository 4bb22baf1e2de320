//! Integration tests for the playback store
//!
//! These tests walk through the listener-visible behaviour a page relies on:
//! loading, toggling, seeking, media events and subscriptions.

use std::cell::RefCell;
use std::rc::Rc;
use theirside_playback::testing::{FakeMediaBackend, MediaCall};
use theirside_playback::{
    EpisodeDescriptor, EpisodeId, LoadIntent, MediaEvent, PlaybackConfig, PlaybackState,
    PlaybackStore,
};

// ===== Test Helpers =====

fn episode(id: u64) -> EpisodeDescriptor {
    EpisodeDescriptor::new(id, format!("{id}: Guest"), format!("{id}.mp3"), "audio/mpeg")
}

/// Store with a fake backend whose setup calls are already cleared
fn store_with_fake() -> (PlaybackStore, FakeMediaBackend) {
    let backend = FakeMediaBackend::new();
    let store = PlaybackStore::with_backend(PlaybackConfig::default(), Box::new(backend.clone()));
    backend.clear_calls();
    (store, backend)
}

/// Records every state a listener receives
fn record(store: &PlaybackStore) -> (Rc<RefCell<Vec<PlaybackState>>>, theirside_playback::Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
    (seen, subscription)
}

// ===== Scenarios =====

#[test]
fn load_toggle_load_same_episode() {
    let store = PlaybackStore::default();

    let first = EpisodeDescriptor::new(1u64, "1: Skeletor", "a.mp3", "audio/mpeg");
    store.load(&first);
    let state = store.state();
    assert_eq!(state.current_episode_id(), Some(EpisodeId::new(1)));
    assert!(state.playing);
    assert_eq!(state.current_time, 0.0);

    store.toggle();
    assert!(!store.state().playing);

    store.load(&first);
    assert!(store.state().playing);
    assert_eq!(store.state().current_episode_id(), Some(EpisodeId::new(1)));
}

#[test]
fn seek_clamps_to_known_duration() {
    let store = PlaybackStore::default();
    store.load(&episode(1));
    store.set_duration(120.0);

    store.seek(9999.0);

    assert_eq!(store.state().current_time, 120.0);
}

#[test]
fn seek_without_duration_only_clamps_negative() {
    let store = PlaybackStore::default();
    store.load(&episode(1));

    store.seek(500.0);
    assert_eq!(store.state().current_time, 500.0);

    store.seek(-3.0);
    assert_eq!(store.state().current_time, 0.0);
}

#[test]
fn seek_does_not_change_playing() {
    let store = PlaybackStore::default();
    store.load_with(&episode(1), LoadIntent::Pause);
    store.set_duration(60.0);

    store.seek(30.0);

    assert!(!store.state().playing);
    assert_eq!(store.state().current_time, 30.0);
}

#[test]
fn switching_episodes_resets_position_and_duration() {
    let store = PlaybackStore::default();
    store.load(&episode(1));
    store.set_duration(300.0);
    store.seek(120.0);

    store.load(&episode(2));

    let state = store.state();
    assert_eq!(state.current_episode_id(), Some(EpisodeId::new(2)));
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.duration, None);
    assert!(state.playing);
}

#[test]
fn load_with_pause_intent_stays_paused() {
    let (store, backend) = store_with_fake();

    store.load_with(&episode(4), LoadIntent::Pause);

    assert!(!store.state().playing);
    assert_eq!(
        backend.calls(),
        vec![
            MediaCall::Load("4.mp3".to_string()),
            MediaCall::SetPlaybackRate(1.0),
            MediaCall::Pause,
        ]
    );
}

#[test]
fn autoplay_disabled_in_config() {
    let store = PlaybackStore::new(PlaybackConfig {
        autoplay: false,
        ..Default::default()
    });

    store.load(&episode(1));

    assert!(!store.state().playing);
    assert_eq!(store.state().current_episode_id(), Some(EpisodeId::new(1)));
}

#[test]
fn toggle_without_episode_is_noop() {
    let (store, backend) = store_with_fake();
    let (seen, _sub) = record(&store);

    store.toggle();
    store.play();
    store.seek(10.0);

    assert!(!store.state().playing);
    assert!(seen.borrow().is_empty());
    assert!(backend.calls().is_empty());
}

#[test]
fn load_without_audio_source_is_noop() {
    let store = PlaybackStore::default();
    let (seen, _sub) = record(&store);

    store.load(&EpisodeDescriptor::new(9u64, "9: Nobody", "", "audio/mpeg"));

    assert_eq!(store.state().current_episode_id(), None);
    assert!(seen.borrow().is_empty());
}

// ===== Media events =====

#[test]
fn ended_pauses_and_rewinds() {
    let (store, backend) = store_with_fake();
    store.load(&episode(1));
    store.handle_event(MediaEvent::DurationChange { duration: 90.0 });
    store.handle_event(MediaEvent::TimeUpdate { current_time: 90.0 });
    backend.clear_calls();

    store.handle_event(MediaEvent::Ended);

    let state = store.state();
    assert!(!state.playing);
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.current_episode_id(), Some(EpisodeId::new(1)));
    assert_eq!(backend.calls(), vec![MediaCall::SetCurrentTime(0.0)]);
}

#[test]
fn error_event_keeps_episode_selected() {
    let store = PlaybackStore::default();
    store.load(&episode(7));

    store.handle_event(MediaEvent::Error {
        message: "MEDIA_ERR_SRC_NOT_SUPPORTED".to_string(),
    });

    let state = store.state();
    assert!(!state.playing);
    assert_eq!(state.current_episode_id(), Some(EpisodeId::new(7)));
    assert_eq!(state.error.as_deref(), Some("MEDIA_ERR_SRC_NOT_SUPPORTED"));

    // Trying again clears the failure
    store.toggle();
    assert!(store.state().playing);
    assert_eq!(store.state().error, None);
}

#[test]
fn play_pause_events_mirror_element() {
    let (store, backend) = store_with_fake();
    store.load(&episode(1));
    backend.clear_calls();

    store.handle_event(MediaEvent::Pause);
    assert!(!store.state().playing);

    store.handle_event(MediaEvent::Play);
    assert!(store.state().playing);

    // Reflected state never loops back into the element
    assert!(backend.calls().is_empty());
}

#[test]
fn events_without_episode_are_ignored() {
    let store = PlaybackStore::default();

    store.handle_event(MediaEvent::Play);
    store.handle_event(MediaEvent::TimeUpdate { current_time: 12.0 });
    store.handle_event(MediaEvent::DurationChange { duration: 60.0 });

    let state = store.state();
    assert!(!state.playing);
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.duration, None);
}

#[test]
fn late_duration_reclamps_position() {
    let store = PlaybackStore::default();
    store.load(&episode(1));
    store.seek(500.0);

    store.set_duration(120.0);

    assert_eq!(store.state().current_time, 120.0);
}

#[test]
fn unknown_duration_values() {
    let store = PlaybackStore::default();
    store.load(&episode(1));
    store.set_duration(200.0);

    store.handle_event(MediaEvent::DurationChange { duration: f64::NAN });
    assert_eq!(store.state().duration, None);

    store.handle_event(MediaEvent::DurationChange { duration: f64::INFINITY });
    assert_eq!(store.state().duration, None);
}

#[test]
fn volume_change_event_updates_mute() {
    let (store, backend) = store_with_fake();

    store.handle_event(MediaEvent::VolumeChange { muted: true });

    assert!(store.state().is_muted());
    assert!(backend.calls().is_empty());
}

// ===== Mute, volume, rate =====

#[test]
fn mute_commands_drive_backend() {
    let (store, backend) = store_with_fake();

    store.set_muted(true);
    assert!(store.state().is_muted());

    store.toggle_mute();
    assert!(!store.state().is_muted());

    assert_eq!(
        backend.calls(),
        vec![
            MediaCall::SetMuted(true),
            MediaCall::SetVolume(0.0),
            MediaCall::SetMuted(false),
            MediaCall::SetVolume(1.0),
        ]
    );
}

#[test]
fn playback_rate_survives_episode_switch() {
    let (store, backend) = store_with_fake();
    store.load(&episode(1));
    store.cycle_playback_rate();
    backend.clear_calls();

    store.load(&episode(2));

    assert_eq!(store.state().playback_rate.label(), "1.5x");
    assert!(backend.calls().contains(&MediaCall::SetPlaybackRate(1.5)));
}

// ===== Subscriptions =====

#[test]
fn one_notification_per_mutating_call() {
    let store = PlaybackStore::default();
    let (seen, _sub) = record(&store);

    store.load(&episode(1));
    store.set_duration(100.0);
    store.seek(50.0);
    store.toggle();
    store.set_muted(true);

    assert_eq!(seen.borrow().len(), 5);
    let last = seen.borrow().last().cloned().unwrap();
    assert_eq!(last, store.state());
}

#[test]
fn unchanged_state_does_not_notify() {
    let store = PlaybackStore::default();
    store.load(&episode(1));
    store.set_duration(100.0);
    let (seen, _sub) = record(&store);

    store.set_duration(100.0);
    store.play();
    store.set_muted(false);

    assert!(seen.borrow().is_empty());
}

#[test]
fn listeners_notified_in_registration_order() {
    let store = PlaybackStore::default();
    let order = Rc::new(RefCell::new(Vec::new()));

    let subs: Vec<_> = (0..3)
        .map(|n| {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push(n))
        })
        .collect();

    store.load(&episode(1));
    store.toggle();

    assert_eq!(*order.borrow(), vec![0, 1, 2, 0, 1, 2]);
    drop(subs);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = PlaybackStore::default();
    let (seen, sub) = record(&store);

    store.load(&episode(1));
    sub.unsubscribe();
    store.toggle();

    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let store = PlaybackStore::default();
    {
        let _sub = store.subscribe(|_| {});
        assert_eq!(store.listener_count(), 1);
    }
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn rapid_loads_last_call_wins() {
    let store = PlaybackStore::default();
    let (seen, _sub) = record(&store);

    store.load(&episode(1));
    store.load(&episode(2));
    store.load(&episode(3));

    assert_eq!(store.state().current_episode_id(), Some(EpisodeId::new(3)));

    // Every notification carries a fully applied load
    for state in seen.borrow().iter() {
        assert!(state.playing);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, None);
    }
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn clones_share_one_store() {
    let store = PlaybackStore::default();
    let other = store.clone();

    other.load(&episode(5));

    assert!(store.is_playing_episode(EpisodeId::new(5)));
}

#[test]
fn surface_reacting_to_state_keeps_others_current() {
    let store = PlaybackStore::default();
    store.load_with(&episode(1), LoadIntent::Pause);
    store.set_duration(100.0);
    store.seek(100.0);

    // A surface that restarts finished episodes from the top
    let handle = store.clone();
    let _restart = store.subscribe(move |state| {
        if !state.playing && state.current_time == 0.0 && state.error.is_none() {
            handle.play();
        }
    });
    let (seen, _sub) = record(&store);

    store.handle_event(MediaEvent::Ended);

    let last = seen.borrow().last().cloned().unwrap();
    assert_eq!(last, store.state());
    assert!(last.playing);
    assert_eq!(seen.borrow().len(), 2);
}
