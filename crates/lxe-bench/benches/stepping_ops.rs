//! Criterion micro-benchmarks for the per-step path.

use criterion::{criterion_group, criterion_main, Criterion};
use lxe_core::{EventId, OutputRow, TrackStatus};
use lxe_engine::SteppingAction;
use lxe_record::{CsvTableWriter, RegionTable, StepRecorder};
use lxe_tracking::TrackingFilter;

use lxe_bench::{reference_profile, reference_stream};

/// Benchmark: tracking decisions over every step of the reference stream.
fn bench_filter_decide(c: &mut Criterion) {
    let events = reference_stream(42);
    let filter = TrackingFilter::default();

    c.bench_function("filter_decide_stream", |b| {
        b.iter(|| {
            let mut overrides = 0u32;
            for event in &events {
                for track in &event.tracks {
                    for step in track.iter_steps(event.event_id) {
                        if filter.decide_step(&step).is_override() {
                            overrides += 1;
                        }
                    }
                }
            }
            std::hint::black_box(overrides);
        });
    });
}

/// Benchmark: region lookup and row extraction into an in-memory table.
fn bench_recorder_vec(c: &mut Criterion) {
    let events = reference_stream(42);

    c.bench_function("recorder_vec_stream", |b| {
        b.iter(|| {
            let mut recorder = StepRecorder::new(RegionTable::default(), Vec::<OutputRow>::new());
            for event in &events {
                for track in &event.tracks {
                    for step in track.iter_steps(event.event_id) {
                        recorder.record(&step).unwrap();
                    }
                }
            }
            std::hint::black_box(recorder.rows_recorded());
        });
    });
}

/// Benchmark: CSV formatting of pre-extracted rows.
fn bench_csv_rows(c: &mut Criterion) {
    let events = reference_stream(42);
    let mut recorder = StepRecorder::new(RegionTable::default(), Vec::<OutputRow>::new());
    for event in &events {
        for track in &event.tracks {
            for step in track.iter_steps(event.event_id) {
                recorder.record(&step).unwrap();
            }
        }
    }
    let rows = recorder.into_sink();

    c.bench_function("csv_format_rows", |b| {
        b.iter(|| {
            let mut writer = CsvTableWriter::with_step_column(Vec::new()).unwrap();
            for row in &rows {
                lxe_core::RowSink::append_row(&mut writer, row.clone()).unwrap();
            }
            std::hint::black_box(writer.into_inner().len());
        });
    });
}

/// Benchmark: the full callback on a single hot track.
fn bench_on_step_single(c: &mut Criterion) {
    let events = reference_stream(42);
    let track = &events[0].tracks[0];
    let step = track.step(EventId(0), 0).unwrap();
    let config = reference_profile(1);

    c.bench_function("on_step_single", |b| {
        let mut action = SteppingAction::from_config(&config, Vec::<OutputRow>::new());
        b.iter(|| {
            let mut status = TrackStatus::Alive;
            let out = action.on_step(&step, &mut status).unwrap();
            std::hint::black_box(out);
        });
    });
}

criterion_group!(
    benches,
    bench_filter_decide,
    bench_recorder_vec,
    bench_csv_rows,
    bench_on_step_single
);
criterion_main!(benches);
