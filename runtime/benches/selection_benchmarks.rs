//! Seat selection benchmarks
//!
//! Measures the pure reducer on a large auditorium and the Store round trip
//! for a toggle followed by a total.
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seatmap_core::reducer::Reducer;
use seatmap_core::session::{
    SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer, SessionPhase, SessionState,
    ShowSession,
};
use seatmap_core::types::ShowDescriptor;
use seatmap_runtime::Store;
use seatmap_testing::fixtures::{seat, ShowBuilder};
use seatmap_testing::mocks::StaticShowSource;
use std::sync::Arc;

/// 20 rows of 30 seats with an aisle in the middle
fn large_auditorium() -> ShowDescriptor {
    let mut builder = ShowBuilder::new().auditorium("IMAX 1");
    for row in 0..20u8 {
        let letter = char::from(b'A' + row);
        let mut cells: Vec<String> = (1..=30).map(|n| format!("{letter}{n}:{}", 150 + u32::from(row) * 10)).collect();
        cells.insert(15, "&".to_string());
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        builder = builder.row(&cells);
    }
    builder.build()
}

fn ready_state(show: &ShowDescriptor) -> SessionState {
    SessionState {
        phase: SessionPhase::Ready(Box::new(ShowSession::new(Arc::new(show.clone())))),
    }
}

fn benchmark_reducer_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    let show = large_auditorium();
    let reducer = SeatPickerReducer::new();
    let env = SeatPickerEnvironment::new(StaticShowSource::shared(show.clone()));

    group.bench_function("toggle_seat", |b| {
        let mut state = ready_state(&show);
        let _ = reducer.reduce(&mut state, SeatPickerAction::SetMaxSeats { count: 6 }, &env);
        b.iter(|| {
            let _effects = reducer.reduce(
                &mut state,
                black_box(SeatPickerAction::ToggleSeat { seat_id: seat("K17") }),
                &env,
            );
        });
    });

    group.bench_function("total_of_six", |b| {
        let mut state = ready_state(&show);
        let _ = reducer.reduce(&mut state, SeatPickerAction::SetMaxSeats { count: 6 }, &env);
        for id in ["A1", "B2", "C3", "D4", "E5", "F6"] {
            let _ = reducer.reduce(&mut state, SeatPickerAction::ToggleSeat { seat_id: seat(id) }, &env);
        }
        b.iter(|| black_box(state.ready().map(ShowSession::total)));
    });

    group.finish();
}

fn benchmark_store_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");

    let show = large_auditorium();

    group.bench_function("toggle_and_total", |b| {
        let store = Store::new(
            ready_state(&show),
            SeatPickerReducer::new(),
            SeatPickerEnvironment::new(StaticShowSource::shared(show.clone())),
        );

        b.to_async(&runtime).iter(|| async {
            let _ = store
                .send(black_box(SeatPickerAction::ToggleSeat { seat_id: seat("K17") }))
                .await;
            let _total = store.state(|s| s.ready().map(ShowSession::total)).await;
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_reducer_toggle, benchmark_store_round_trip);
criterion_main!(benches);
