//! Integration test: full runs over synthetic event streams.
//!
//! Checks that splitting events across workers changes nothing but the
//! interleaving of events, that CSV output lands on disk with the right
//! shape, and that fatal step and sink errors abort the run.

use std::collections::BTreeMap;

use lxe_core::{
    CopyIndex, EventId, EventRecord, OutputRow, StepError, StepRecord, TrackId, TrackRecord,
    VolumeRecord, OUTPUT_SCHEMA,
};
use lxe_engine::{csv_sink, Run, RunConfig, RunError};
use lxe_record::{SharedTable, STEP_COLUMN};
use lxe_test_utils::{synthetic_events, CollectingSink, SyntheticConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("lxe_engine=debug")
        .try_init();
}

fn config(workers: usize) -> RunConfig {
    RunConfig {
        worker_count: Some(workers),
        batch_size: 4,
        ..RunConfig::default()
    }
}

fn run_rows(workers: usize, events: Vec<EventRecord>) -> (Vec<OutputRow>, u64) {
    let mut run = Run::begin(config(workers), Vec::new()).unwrap();
    run.process_events(events).unwrap();
    let summary = run.end().unwrap();
    (summary.sink, summary.metrics.rows_recorded)
}

fn by_event(rows: &[OutputRow]) -> BTreeMap<i32, Vec<OutputRow>> {
    let mut map: BTreeMap<i32, Vec<OutputRow>> = BTreeMap::new();
    for row in rows {
        map.entry(row.event_id.0).or_default().push(row.clone());
    }
    map
}

fn xenon_event(id: i32, steps: usize) -> EventRecord {
    let step = StepRecord {
        volume: Some(VolumeRecord {
            name: "Xecylinder".into(),
            copy_index: CopyIndex::NONE,
        }),
        ..StepRecord::default()
    };
    EventRecord {
        event_id: EventId(id),
        tracks: vec![TrackRecord {
            species: "neutron".into(),
            track_id: TrackId(1),
            parent_id: TrackId::NO_PARENT,
            steps: vec![step; steps],
        }],
    }
}

#[test]
fn worker_count_does_not_change_rows_per_event() {
    init_tracing();
    let synth = SyntheticConfig {
        events: 64,
        ..SyntheticConfig::default()
    };
    let (single, single_count) = run_rows(1, synthetic_events(&synth));
    let (multi, multi_count) = run_rows(4, synthetic_events(&synth));

    assert!(!single.is_empty());
    assert_eq!(single.len() as u64, single_count);
    assert_eq!(single_count, multi_count);
    assert_eq!(by_event(&single), by_event(&multi));
}

#[test]
fn single_worker_output_follows_event_order() {
    let (rows, _) = run_rows(1, synthetic_events(&SyntheticConfig::default()));
    let ids: Vec<i32> = rows.iter().map(|r| r.event_id.0).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn every_recorded_row_is_in_a_listed_region() {
    let (rows, _) = run_rows(2, synthetic_events(&SyntheticConfig::default()));
    for row in &rows {
        match row.tag.as_str() {
            "Xe" => assert_eq!(row.copy_index, CopyIndex::NONE),
            "scintor" => assert!(row.copy_index.0 >= 0),
            other => panic!("unexpected tag {other}"),
        }
    }
}

#[test]
fn csv_output_written_to_disk() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lxe_out.csv");
    let config = RunConfig {
        output_path: Some(path.clone()),
        step_column: true,
        ..config(2)
    };
    let sink = csv_sink(&config).unwrap();
    let mut run = Run::begin(config, sink).unwrap();
    run.process_events(synthetic_events(&SyntheticConfig::default()))
        .unwrap();
    let summary = run.end().unwrap();
    let rows = summary.sink.rows_written();
    assert_eq!(rows, summary.metrics.rows_recorded);
    drop(summary);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(header.len(), OUTPUT_SCHEMA.len() + 1);
    assert_eq!(header[0], "Energy");
    assert_eq!(header[OUTPUT_SCHEMA.len()], STEP_COLUMN);
    assert_eq!(lines.count() as u64, rows);
}

#[test]
fn missing_output_path_is_a_config_error() {
    assert!(matches!(
        csv_sink(&config(1)),
        Err(RunError::Config(lxe_engine::ConfigError::NoOutputPath))
    ));
}

#[test]
fn missing_volume_aborts_across_workers() {
    let mut events: Vec<EventRecord> = (0..8).map(|i| xenon_event(i, 3)).collect();
    events[5].tracks[0].steps[1].volume = None;
    let mut run = Run::begin(config(3), Vec::new()).unwrap();
    let err = run.process_events(events).unwrap_err();
    match err {
        RunError::Step(StepError::MissingVolume {
            event_id,
            step_number,
            ..
        }) => {
            assert_eq!(event_id, EventId(5));
            assert_eq!(step_number, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sink_failure_aborts_the_run() {
    let events: Vec<EventRecord> = (0..10).map(|i| xenon_event(i, 4)).collect();
    let mut run = Run::begin(config(2), CollectingSink::failing_after(3)).unwrap();
    let err = run.process_events(events).unwrap_err();
    assert!(matches!(err, RunError::Sink(lxe_core::SinkError::Closed)));
}

#[test]
fn shared_table_handle_sees_merged_rows() {
    let table = SharedTable::new();
    let observer = table.clone();
    let mut run = Run::begin(config(3), table).unwrap();
    run.process_events(synthetic_events(&SyntheticConfig::default()))
        .unwrap();
    let summary = run.end().unwrap();

    let rows = observer.snapshot().unwrap();
    assert_eq!(rows.len() as u64, summary.rows_written);
    assert_eq!(rows.len() as u64, summary.metrics.rows_recorded);

    let (expected, _) = run_rows(1, synthetic_events(&SyntheticConfig::default()));
    assert_eq!(by_event(&rows), by_event(&expected));
}

#[test]
fn zero_events_skip_the_final_flush() {
    let mut run = Run::begin(config(2), CollectingSink::new()).unwrap();
    run.process_events(Vec::new()).unwrap();
    let summary = run.end().unwrap();
    assert_eq!(summary.events, 0);
    assert_eq!(summary.sink.flushes, 0);
    assert!(summary.sink.rows.is_empty());
}

#[test]
fn events_accumulate_across_batches() {
    let mut run = Run::begin(config(2), CollectingSink::new()).unwrap();
    run.process_events((0..3).map(|i| xenon_event(i, 2)).collect())
        .unwrap();
    run.process_events((3..7).map(|i| xenon_event(i, 2)).collect())
        .unwrap();
    assert_eq!(run.events_processed(), 7);
    let summary = run.end().unwrap();
    assert_eq!(summary.sink.flushes, 1);
    assert_eq!(summary.sink.rows.len(), 14);
    assert_eq!(summary.metrics.steps, 14);
}
