//! The recorded output row and its fixed 17-column schema.
//!
//! Column order is part of the output contract and never changes.
//! [`OutputRow::cells`] is the single place that maps struct fields
//! to column positions; every writer goes through it.

use crate::id::{CopyIndex, EventId, TrackId};

/// Name of the output table.
pub const TABLE_NAME: &str = "event";

/// Title of the output table.
pub const TABLE_TITLE: &str = "Energy and Position";

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit float.
    Double,
    /// 32-bit signed integer.
    Int,
    /// UTF-8 string.
    Str,
}

/// One column of the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column name as written in headers.
    pub name: &'static str,
    /// Storage type.
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

/// The output schema, in column order.
pub const OUTPUT_SCHEMA: [Column; 17] = [
    col("Energy", ColumnType::Double),
    col("prex", ColumnType::Double),
    col("prey", ColumnType::Double),
    col("prez", ColumnType::Double),
    col("postx", ColumnType::Double),
    col("posty", ColumnType::Double),
    col("postz", ColumnType::Double),
    col("ptype", ColumnType::Str),
    col("eventID", ColumnType::Int),
    col("trackID", ColumnType::Int),
    col("parentID", ColumnType::Int),
    col("dE", ColumnType::Double),
    col("creatprosName", ColumnType::Str),
    col("endprosName", ColumnType::Str),
    col("tag", ColumnType::Str),
    col("copyNo", ColumnType::Int),
    col("time", ColumnType::Double),
];

/// A typed cell borrowed from an [`OutputRow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    /// Float cell.
    Double(f64),
    /// Integer cell.
    Int(i32),
    /// String cell.
    Str(&'a str),
}

impl Cell<'_> {
    /// The column type this cell belongs in.
    pub fn ty(&self) -> ColumnType {
        match self {
            Self::Double(_) => ColumnType::Double,
            Self::Int(_) => ColumnType::Int,
            Self::Str(_) => ColumnType::Str,
        }
    }
}

/// One recorded observation of a step inside a region of interest.
///
/// Every field is always populated: absent processes are stored as
/// [`UNKNOWN_PROCESS`](crate::UNKNOWN_PROCESS) and non-instanced
/// regions carry [`CopyIndex::NONE`].
#[derive(Clone, Debug, PartialEq)]
pub struct OutputRow {
    /// Pre-step kinetic energy in keV.
    pub energy_kev: f64,
    /// Pre-step position in mm.
    pub pre_position: [f64; 3],
    /// Post-step position in mm.
    pub post_position: [f64; 3],
    /// Particle species name.
    pub species: String,
    /// Owning event.
    pub event_id: EventId,
    /// Owning track.
    pub track_id: TrackId,
    /// Parent of the owning track.
    pub parent_id: TrackId,
    /// Energy deposited during the step, in keV.
    pub energy_deposit_kev: f64,
    /// Process that defined the pre-step point.
    pub creator_process: String,
    /// Process that defined the post-step point.
    pub end_process: String,
    /// Region tag, e.g. `"Xe"` or `"scintor"`.
    pub tag: String,
    /// Copy index for instanced regions, `-1` otherwise.
    pub copy_index: CopyIndex,
    /// Global time at the post-step point, in ns.
    pub time: f64,
}

impl OutputRow {
    /// The row's cells in [`OUTPUT_SCHEMA`] order.
    pub fn cells(&self) -> [Cell<'_>; 17] {
        let [prex, prey, prez] = self.pre_position;
        let [postx, posty, postz] = self.post_position;
        [
            Cell::Double(self.energy_kev),
            Cell::Double(prex),
            Cell::Double(prey),
            Cell::Double(prez),
            Cell::Double(postx),
            Cell::Double(posty),
            Cell::Double(postz),
            Cell::Str(&self.species),
            Cell::Int(self.event_id.0),
            Cell::Int(self.track_id.0),
            Cell::Int(self.parent_id.0),
            Cell::Double(self.energy_deposit_kev),
            Cell::Str(&self.creator_process),
            Cell::Str(&self.end_process),
            Cell::Str(&self.tag),
            Cell::Int(self.copy_index.0),
            Cell::Double(self.time),
        ]
    }
}
