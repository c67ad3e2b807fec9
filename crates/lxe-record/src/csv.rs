//! CSV export of the output table.
//!
//! [`CsvTableWriter`] streams rows to any `Write` sink. The header is
//! written immediately on construction from
//! [`OUTPUT_SCHEMA`](lxe_core::OUTPUT_SCHEMA). An optional trailing
//! [`STEP_COLUMN`] numbers consecutive rows of the same track within the
//! same region.
//!
//! ```text
//! Energy,prex,prey,prez,postx,posty,postz,ptype,eventID,trackID,parentID,dE,creatprosName,endprosName,tag,copyNo,time[,step]
//! ```

use std::io::Write;

use lxe_core::{Cell, EventId, OutputRow, RowSink, SinkError, TrackId, OUTPUT_SCHEMA};

/// Name of the optional per-track step counter column.
pub const STEP_COLUMN: &str = "step";

/// Running counter over consecutive rows.
///
/// The count increments while consecutive rows share
/// `(ptype, eventID, trackID, tag)` and resets to 1 otherwise.
#[derive(Clone, Debug, Default)]
pub struct StepCounter {
    last: Option<(String, EventId, TrackId, String)>,
    count: u64,
}

impl StepCounter {
    /// Fresh counter; the first row gets 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `row` and return its step number.
    pub fn next(&mut self, row: &OutputRow) -> u64 {
        let same = self.last.as_ref().is_some_and(|(species, event, track, tag)| {
            *species == row.species
                && *event == row.event_id
                && *track == row.track_id
                && *tag == row.tag
        });
        if same {
            self.count += 1;
        } else {
            self.count = 1;
            self.last = Some((
                row.species.clone(),
                row.event_id,
                row.track_id,
                row.tag.clone(),
            ));
        }
        self.count
    }
}

/// Writes the output table as CSV.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use lxe_record::CsvTableWriter;
///
/// let writer = CsvTableWriter::new(Vec::new()).unwrap();
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(text.starts_with("Energy,prex,prey,prez,"));
/// assert!(text.ends_with(",copyNo,time\n"));
/// ```
#[derive(Debug)]
pub struct CsvTableWriter<W: Write> {
    writer: W,
    steps: Option<StepCounter>,
    rows_written: u64,
}

impl<W: Write> CsvTableWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(writer: W) -> Result<Self, SinkError> {
        Self::build(writer, None)
    }

    /// Create a writer that appends the [`STEP_COLUMN`] counter.
    pub fn with_step_column(writer: W) -> Result<Self, SinkError> {
        Self::build(writer, Some(StepCounter::new()))
    }

    fn build(mut writer: W, steps: Option<StepCounter>) -> Result<Self, SinkError> {
        let mut header = OUTPUT_SCHEMA
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(",");
        if steps.is_some() {
            header.push(',');
            header.push_str(STEP_COLUMN);
        }
        writeln!(writer, "{header}")?;
        Ok(Self {
            writer,
            steps,
            rows_written: 0,
        })
    }

    /// Number of data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for CsvTableWriter<W> {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        let mut line = String::with_capacity(160);
        for (i, cell) in row.cells().iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            push_cell(&mut line, cell);
        }
        if let Some(counter) = self.steps.as_mut() {
            line.push(',');
            line.push_str(&counter.next(&row).to_string());
        }
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

fn push_cell(line: &mut String, cell: &Cell<'_>) {
    match cell {
        Cell::Double(v) => line.push_str(&v.to_string()),
        Cell::Int(v) => line.push_str(&v.to_string()),
        Cell::Str(s) => push_quoted(line, s),
    }
}

/// Quote a string cell only when it contains a delimiter, quote, or
/// line break; embedded quotes are doubled.
fn push_quoted(line: &mut String, s: &str) {
    if s.contains([',', '"', '\n', '\r']) {
        line.push('"');
        line.push_str(&s.replace('"', "\"\""));
        line.push('"');
    } else {
        line.push_str(s);
    }
}
