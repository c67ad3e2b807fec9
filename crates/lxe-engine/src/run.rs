//! Run lifecycle and multi-worker event processing.
//!
//! ```text
//!   process_events(events)
//!        |
//!   [task queue: unbounded]  --->  worker 0..N  (own SteppingAction<BatchSink>)
//!                                       |
//!                           [batch_tx: bounded(N*4)]
//!                                       v
//!                           merger (caller's thread) ---> final RowSink
//! ```
//!
//! Workers never share mutable state. The merger is the only writer to
//! the final sink, so rows from one worker keep that worker's order and
//! every row of an event stays in processing order. With one worker the
//! table order is exactly the step processing order.
//!
//! Any step error or sink error raises an abort flag; workers stop after
//! their current event, the merger drains and discards remaining
//! batches, and the run fails with the first error. A worker that fails
//! mid-event still ships the rows it recorded and reports its counters,
//! so the run's totals always describe what reached the sink.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use lxe_core::{
    EventRecord, OutputRow, RowSink, SinkError, StepError, TrackStatus, TABLE_NAME, TABLE_TITLE,
};
use lxe_record::CsvTableWriter;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, RunConfig, ScintillatorModel};
use crate::merge::BatchSink;
use crate::metrics::StepMetrics;
use crate::stepping::SteppingAction;

// ── RunError ───────────────────────────────────────────────────────

/// Errors that abort a run.
#[derive(Debug)]
pub enum RunError {
    /// The configuration is invalid.
    Config(ConfigError),
    /// A worker failed on a step.
    Step(StepError),
    /// The final sink rejected a row or a flush.
    Sink(SinkError),
    /// The output table could not be created.
    Output {
        /// Path of the output file.
        path: PathBuf,
        /// The underlying failure.
        source: SinkError,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
    /// A worker thread panicked.
    WorkerPanicked {
        /// Index of the worker.
        worker: usize,
    },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
            Self::Sink(e) => write!(f, "sink: {e}"),
            Self::Output { path, source } => {
                write!(f, "cannot open output {}: {source}", path.display())
            }
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
            Self::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step(e) => Some(e),
            Self::Sink(e) => Some(e),
            Self::Output { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StepError> for RunError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

impl From<SinkError> for RunError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}

// ── Output ─────────────────────────────────────────────────────────

/// Open the configured CSV output table, writing its header.
pub fn csv_sink(config: &RunConfig) -> Result<CsvTableWriter<BufWriter<File>>, RunError> {
    let path = config.output_path.clone().ok_or(ConfigError::NoOutputPath)?;
    let open = || -> Result<_, SinkError> {
        let file = BufWriter::new(File::create(&path)?);
        if config.step_column {
            CsvTableWriter::with_step_column(file)
        } else {
            CsvTableWriter::new(file)
        }
    };
    open().map_err(|source| RunError::Output {
        path: path.clone(),
        source,
    })
}

// ── Event transport ────────────────────────────────────────────────

/// Feed every track of `event` through `action`, in order.
///
/// Each track starts [`TrackStatus::Alive`]; once a step leaves it
/// terminated, its remaining steps are dropped.
pub fn transport_event<S: RowSink>(
    action: &mut SteppingAction<S>,
    event: &EventRecord,
) -> Result<(), StepError> {
    for track in &event.tracks {
        let mut status = TrackStatus::Alive;
        for (index, step) in track.iter_steps(event.event_id).enumerate() {
            action.on_step(&step, &mut status)?;
            if status.is_terminated() {
                action.note_dropped(track.steps.len() - index - 1);
                break;
            }
        }
    }
    Ok(())
}

// ── Run ────────────────────────────────────────────────────────────

/// Result of a completed run.
#[derive(Debug)]
pub struct RunSummary<S> {
    /// Scintillator model the run was configured with.
    pub model: ScintillatorModel,
    /// Events fully processed.
    pub events: u64,
    /// Rows appended to the final sink.
    pub rows_written: u64,
    /// Counters merged across all workers, including failed ones.
    pub metrics: StepMetrics,
    /// Whether any `process_events` call failed.
    pub aborted: bool,
    /// The final sink, flushed unless nothing was processed or written.
    pub sink: S,
}

/// One run: configuration, a final sink, and accumulated counters.
///
/// # Examples
///
/// ```
/// use lxe_core::OutputRow;
/// use lxe_engine::{Run, RunConfig};
///
/// let run = Run::begin(RunConfig::default(), Vec::<OutputRow>::new()).unwrap();
/// let summary = run.end().unwrap();
/// assert_eq!(summary.events, 0);
/// assert!(summary.sink.is_empty());
/// ```
#[derive(Debug)]
pub struct Run<S> {
    config: RunConfig,
    sink: S,
    events: u64,
    rows_written: u64,
    metrics: StepMetrics,
    aborted: bool,
}

struct WorkerReport {
    events: u64,
    metrics: StepMetrics,
    error: Option<StepError>,
}

impl<S: RowSink> Run<S> {
    /// Validate `config` and start a run writing to `sink`.
    pub fn begin(config: RunConfig, sink: S) -> Result<Self, RunError> {
        config.validate()?;
        if config.policy.markers().next().is_none() {
            warn!("recoil policy has no species markers; tracking overrides disabled");
        }
        info!(
            model = %config.model,
            table = TABLE_NAME,
            title = TABLE_TITLE,
            workers = config.resolved_worker_count(),
            regions = config.regions.len(),
            output = ?config.output_path,
            "beginning run"
        );
        Ok(Self {
            config,
            sink,
            events: 0,
            rows_written: 0,
            metrics: StepMetrics::default(),
            aborted: false,
        })
    }

    /// The run's configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.events
    }

    /// Rows appended to the final sink so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Counters merged so far.
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Whether an earlier `process_events` call failed.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Process a batch of events across the configured worker threads.
    pub fn process_events(&mut self, events: Vec<EventRecord>) -> Result<(), RunError> {
        if events.is_empty() {
            return Ok(());
        }
        let workers = self.config.resolved_worker_count().min(events.len());
        debug!(events = events.len(), workers, "processing events");

        let (task_tx, task_rx) = crossbeam_channel::unbounded::<EventRecord>();
        for event in events {
            // The receiver is alive in this scope, so this cannot fail.
            if task_tx.send(event).is_err() {
                return Err(RunError::Sink(SinkError::Closed));
            }
        }
        drop(task_tx);

        let (batch_tx, batch_rx) = crossbeam_channel::bounded::<Vec<OutputRow>>(workers * 4);
        let abort = AtomicBool::new(false);
        let config = &self.config;
        let sink = &mut self.sink;

        let (reports, merged, spawn_error) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;
            for worker in 0..workers {
                let tasks = task_rx.clone();
                let batches = batch_tx.clone();
                let abort = &abort;
                let spawned = thread::Builder::new()
                    .name(format!("lxe-worker-{worker}"))
                    .spawn_scoped(scope, move || worker_loop(config, tasks, batches, abort));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        abort.store(true, Ordering::Relaxed);
                        spawn_error = Some(RunError::ThreadSpawnFailed {
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
            drop(batch_tx);

            let merged = merge_batches(&batch_rx, sink, &abort);

            let reports: Vec<_> = handles
                .into_iter()
                .enumerate()
                .map(|(worker, h)| h.join().map_err(|_| worker))
                .collect();
            (reports, merged, spawn_error)
        });
        let (rows_merged, merge_error) = merged;
        self.rows_written += rows_merged;

        let mut first_error = spawn_error;
        for report in reports {
            match report {
                Ok(r) => {
                    self.events += r.events;
                    self.metrics.merge(&r.metrics);
                    if let Some(e) = r.error {
                        first_error.get_or_insert(RunError::Step(e));
                    }
                }
                Err(worker) => {
                    first_error.get_or_insert(RunError::WorkerPanicked { worker });
                }
            }
        }
        if let Some(e) = merge_error {
            first_error.get_or_insert(RunError::Sink(e));
        }
        match first_error {
            Some(e) => {
                self.aborted = true;
                warn!(
                    error = %e,
                    events = self.events,
                    rows = self.rows_written,
                    "run aborted"
                );
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// Finish the run.
    ///
    /// Flushes the sink unless no event completed and no row reached it.
    /// An aborted run still flushes what it wrote and reports
    /// [`RunSummary::aborted`].
    pub fn end(mut self) -> Result<RunSummary<S>, RunError> {
        if self.events == 0 && self.rows_written == 0 {
            info!(aborted = self.aborted, "run ended with no events; output not written");
        } else {
            self.sink.flush()?;
            info!(
                table = TABLE_NAME,
                aborted = self.aborted,
                events = self.events,
                rows_written = self.rows_written,
                steps = self.metrics.steps,
                rows = self.metrics.rows_recorded,
                forced_alive = self.metrics.forced_alive,
                forced_terminated = self.metrics.forced_terminated,
                "run ended"
            );
        }
        Ok(RunSummary {
            model: self.config.model,
            events: self.events,
            rows_written: self.rows_written,
            metrics: self.metrics,
            aborted: self.aborted,
            sink: self.sink,
        })
    }
}

/// Append every incoming batch to `sink` until all workers hang up.
/// Returns the number of rows appended.
///
/// After the first sink error the remaining batches are drained and
/// discarded so that no worker blocks on a full channel.
fn merge_batches<S: RowSink>(
    batches: &Receiver<Vec<OutputRow>>,
    sink: &mut S,
    abort: &AtomicBool,
) -> (u64, Option<SinkError>) {
    let mut appended = 0;
    let mut error = None;
    for batch in batches.iter() {
        if error.is_some() {
            continue;
        }
        for row in batch {
            if let Err(e) = sink.append_row(row) {
                abort.store(true, Ordering::Relaxed);
                error = Some(e);
                break;
            }
            appended += 1;
        }
    }
    (appended, error)
}

fn worker_loop(
    config: &RunConfig,
    tasks: Receiver<EventRecord>,
    batches: Sender<Vec<OutputRow>>,
    abort: &AtomicBool,
) -> WorkerReport {
    let mut action = SteppingAction::from_config(config, BatchSink::new(batches, config.batch_size));
    let mut events = 0;
    let mut error = None;
    for event in tasks.iter() {
        if abort.load(Ordering::Relaxed) {
            break;
        }
        if let Err(e) = transport_event(&mut action, &event) {
            abort.store(true, Ordering::Relaxed);
            debug!(event = %event.event_id, error = %e, "worker stopped");
            error = Some(e);
            break;
        }
        events += 1;
    }
    // Rows recorded before a failure still ship; the first error wins.
    if let Err(e) = action.flush() {
        abort.store(true, Ordering::Relaxed);
        error.get_or_insert(e);
    }
    let (_, metrics) = action.into_parts();
    WorkerReport {
        events,
        metrics,
        error,
    }
}
