//! Integration tests for the Store driving a seat picker session
//!
//! Every `send` returns only after the effects it caused were reduced, so the
//! tests read state straight after awaiting a dispatch.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use seatmap_core::classify::DisplayState;
use seatmap_core::error::LoadError;
use seatmap_core::session::{
    SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer, SessionPhase, SessionState,
};
use seatmap_core::types::{Price, SeatStatus, ShowDescriptor};
use seatmap_runtime::{session_health, HealthStatus, Store, StoreError};
use seatmap_testing::fixtures::{sample_show, scenario_show, seat};
use seatmap_testing::init_tracing;
use seatmap_testing::mocks::StaticShowSource;
use std::sync::Arc;

type SeatStore = Store<SessionState, SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer>;

fn store_with(source: Arc<StaticShowSource>) -> SeatStore {
    init_tracing();
    Store::new(
        SessionState::default(),
        SeatPickerReducer::new(),
        SeatPickerEnvironment::new(source),
    )
}

async fn loaded(show: ShowDescriptor) -> SeatStore {
    let store = store_with(StaticShowSource::shared(show));
    store.send(SeatPickerAction::LoadShow).await.unwrap();
    store
}

async fn toggle(store: &SeatStore, id: &str) {
    store
        .send(SeatPickerAction::ToggleSeat { seat_id: seat(id) })
        .await
        .unwrap();
}

async fn selected(store: &SeatStore) -> Vec<String> {
    store
        .state(|s| {
            s.ready()
                .unwrap()
                .selection()
                .selected()
                .iter()
                .map(ToString::to_string)
                .collect()
        })
        .await
}

async fn total(store: &SeatStore) -> Price {
    store.state(|s| s.ready().unwrap().total()).await
}

#[tokio::test]
async fn load_show_reaches_ready_before_send_returns() {
    let source = StaticShowSource::shared(sample_show());
    let store = store_with(Arc::clone(&source));

    store.send(SeatPickerAction::LoadShow).await.unwrap();

    let (ready, health) = store
        .state(|s| (s.ready().is_some(), session_health(s).status))
        .await;
    assert!(ready);
    assert_eq!(health, HealthStatus::Healthy);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn second_load_does_not_refetch() {
    let source = StaticShowSource::shared(sample_show());
    let store = store_with(Arc::clone(&source));

    store.send(SeatPickerAction::LoadShow).await.unwrap();
    toggle(&store, "A1").await;
    store.send(SeatPickerAction::LoadShow).await.unwrap();

    assert_eq!(source.fetch_count(), 1);
    assert_eq!(selected(&store).await, vec!["A1"]);
}

#[tokio::test]
async fn failed_load_is_kept_in_state() {
    let error = LoadError::HttpStatus {
        location: "http://shows.test/seats.json".to_string(),
        status: 503,
    };
    let store = store_with(Arc::new(StaticShowSource::failing(error.clone())));

    store.send(SeatPickerAction::LoadShow).await.unwrap();

    let (load_error, health) = store
        .state(|s| (s.load_error().cloned(), session_health(s).status))
        .await;
    assert_eq!(load_error, Some(error));
    assert_eq!(health, HealthStatus::Unhealthy);
}

#[tokio::test]
async fn single_seat_session_swaps_nothing_at_cap() {
    let store = loaded(scenario_show()).await;

    toggle(&store, "A1").await;
    assert_eq!(total(&store).await, Price::new(150));

    // Cap 1 is reached; another seat is ignored rather than swapped
    toggle(&store, "A3").await;
    assert_eq!(selected(&store).await, vec!["A1"]);
    assert_eq!(total(&store).await, Price::new(150));
}

#[tokio::test]
async fn two_seat_session_end_to_end() {
    let store = loaded(scenario_show()).await;

    store
        .send(SeatPickerAction::SetMaxSeats { count: 2 })
        .await
        .unwrap();
    toggle(&store, "A1").await;
    toggle(&store, "A3").await;
    assert_eq!(total(&store).await, Price::new(350));

    toggle(&store, "A2").await;
    assert_eq!(selected(&store).await, vec!["A1", "A3"]);

    toggle(&store, "A1").await;
    assert_eq!(selected(&store).await, vec!["A3"]);
    assert_eq!(total(&store).await, Price::new(200));

    store
        .send(SeatPickerAction::SetMaxSeats { count: 1 })
        .await
        .unwrap();
    assert!(selected(&store).await.is_empty());
    assert_eq!(total(&store).await, Price::ZERO);
}

#[tokio::test]
async fn taken_and_in_progress_seats_cannot_be_selected() {
    let store = loaded(sample_show()).await;
    store
        .send(SeatPickerAction::SetMaxSeats { count: 4 })
        .await
        .unwrap();

    toggle(&store, "A2").await;
    toggle(&store, "B3").await;

    assert!(selected(&store).await.is_empty());
    let states = store
        .state(|s| {
            let session = s.ready().unwrap();
            (session.classify(&seat("A2")), session.classify(&seat("B3")))
        })
        .await;
    assert_eq!(states, (DisplayState::Taken, DisplayState::InProgress));
}

#[tokio::test]
async fn taken_seat_stays_taken_after_status_change() {
    let store = loaded(sample_show()).await;

    store
        .send(SeatPickerAction::SeatStatusChanged {
            seat_id: seat("A2"),
            status: SeatStatus::InProgress,
        })
        .await
        .unwrap();
    toggle(&store, "A2").await;

    assert!(selected(&store).await.is_empty());
    assert_eq!(total(&store).await, Price::ZERO);
    let state = store
        .state(|s| s.ready().unwrap().classify(&seat("A2")))
        .await;
    assert_eq!(state, DisplayState::Taken);
}

#[tokio::test]
async fn status_change_drops_selected_seat() {
    let store = loaded(sample_show()).await;
    toggle(&store, "C1").await;

    store
        .send(SeatPickerAction::SeatStatusChanged {
            seat_id: seat("C1"),
            status: SeatStatus::Taken,
        })
        .await
        .unwrap();

    assert!(selected(&store).await.is_empty());
    assert_eq!(total(&store).await, Price::ZERO);
}

#[tokio::test]
async fn load_result_is_broadcast() {
    let store = store_with(StaticShowSource::shared(scenario_show()));
    let mut actions = store.subscribe_actions();

    store.send(SeatPickerAction::LoadShow).await.unwrap();

    let action = actions.recv().await.unwrap();
    assert!(matches!(action, SeatPickerAction::ShowLoaded(_)));
}

#[tokio::test]
async fn concurrent_toggles_respect_the_cap() {
    let store = loaded(sample_show()).await;
    store
        .send(SeatPickerAction::SetMaxSeats { count: 2 })
        .await
        .unwrap();

    let handles: Vec<_> = ["A1", "A3", "A4", "B1", "C2"]
        .into_iter()
        .map(|id| {
            let store = store.clone();
            tokio::spawn(async move { toggle(&store, id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(selected(&store).await.len(), 2);
}

#[tokio::test]
async fn shutdown_stops_accepting_actions() {
    let store = loaded(scenario_show()).await;
    store.shutdown();

    let result = store
        .send(SeatPickerAction::ToggleSeat { seat_id: seat("A1") })
        .await;

    assert_eq!(result, Err(StoreError::ShutdownInProgress));
    assert!(
        store
            .state(|s| matches!(&s.phase, SessionPhase::Ready(session) if session.selection().is_empty()))
            .await
    );
}
