//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the builder-input for a [`Run`](crate::Run).
//! [`validate()`](RunConfig::validate) checks structural invariants at
//! startup. Configurations can also be read from TOML:
//!
//! ```toml
//! model = "CsI"
//! output = "event.csv"
//! workers = 4
//! batch_size = 512
//! step_column = true
//!
//! [recoil]
//! markers = ["Xe"]
//! elastic_process = "hadElastic"
//!
//! [[regions]]
//! volume = "Xecylinder"
//! tag = "Xe"
//!
//! [[regions]]
//! volume = "Scintor"
//! tag = "scintor"
//! instanced = true
//! ```

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lxe_record::{RegionKind, RegionTable, DEFAULT_TAG};
use lxe_tracking::{RecoilPolicy, DEFAULT_ELASTIC_PROCESS};
use serde::Deserialize;

// ── ScintillatorModel ──────────────────────────────────────────────

/// Scintillator crystal material used when building the geometry.
///
/// Geometry construction belongs to the host; the step logic is the
/// same for every model. The choice is carried so it can be logged and
/// stamped on the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScintillatorModel {
    /// Sodium iodide cubes.
    #[default]
    NaI,
    /// Caesium iodide cubes.
    CsI,
}

impl ScintillatorModel {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NaI => "NaI",
            Self::CsI => "CsI",
        }
    }
}

impl fmt::Display for ScintillatorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScintillatorModel {
    type Err = ConfigError;

    /// Case-insensitive, surrounding whitespace ignored.
    ///
    /// Only `NaI` and `CsI` are accepted. Detector macros that select
    /// the model by "`NaI` or anything else" fall back to CsI for any
    /// other value; here an unrecognised name is a
    /// [`ConfigError::UnknownModel`] so a typo cannot silently switch
    /// the crystal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nai" => Ok(Self::NaI),
            "csi" => Ok(Self::CsI),
            _ => Err(ConfigError::UnknownModel {
                value: s.to_string(),
            }),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a [`RunConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The scintillator model name is not recognized.
    UnknownModel {
        /// The rejected value.
        value: String,
    },
    /// `batch_size` is zero.
    BatchSizeZero,
    /// `worker_count` is `Some(0)`.
    WorkerCountZero,
    /// The region table is empty, so nothing would ever be recorded.
    NoRegions,
    /// A region has an empty volume name or tag.
    InvalidRegion {
        /// Description of the problem.
        reason: String,
    },
    /// The recoil policy's elastic process name is empty.
    EmptyElasticProcess,
    /// A CSV output was requested but no output path is configured.
    NoOutputPath,
    /// The configuration file could not be read.
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },
    /// The configuration text is not valid TOML for this schema.
    Parse {
        /// Parser error message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModel { value } => {
                write!(f, "unknown scintillator model '{value}' (expected NaI or CsI)")
            }
            Self::BatchSizeZero => write!(f, "batch_size must be at least 1"),
            Self::WorkerCountZero => write!(f, "worker_count must be at least 1"),
            Self::NoRegions => write!(f, "no recorded regions configured"),
            Self::InvalidRegion { reason } => write!(f, "invalid region: {reason}"),
            Self::EmptyElasticProcess => write!(f, "elastic process name is empty"),
            Self::NoOutputPath => write!(f, "no output path configured"),
            Self::Read { path, reason } => {
                write!(f, "cannot read config {}: {reason}", path.display())
            }
            Self::Parse { reason } => write!(f, "config parse error: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── RunConfig ──────────────────────────────────────────────────────

/// Everything a run needs besides its events and its sink.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Scintillator material. Default: NaI.
    pub model: ScintillatorModel,
    /// CSV output path, used by [`csv_sink`](crate::csv_sink).
    pub output_path: Option<PathBuf>,
    /// Tracking overrides.
    pub policy: RecoilPolicy,
    /// Recorded regions.
    pub regions: RegionTable,
    /// Worker threads. `None` = auto-detect.
    pub worker_count: Option<usize>,
    /// Rows a worker buffers before handing them to the merger. Default: 256.
    pub batch_size: usize,
    /// Append the per-track `step` counter column to CSV output.
    pub step_column: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ScintillatorModel::default(),
            output_path: None,
            policy: RecoilPolicy::default(),
            regions: RegionTable::default(),
            worker_count: None,
            batch_size: 256,
            step_column: false,
        }
    }
}

impl RunConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::BatchSizeZero);
        }
        if self.worker_count == Some(0) {
            return Err(ConfigError::WorkerCountZero);
        }
        if self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }
        for (volume, region) in self.regions.iter() {
            if volume.is_empty() {
                return Err(ConfigError::InvalidRegion {
                    reason: "empty volume name".to_string(),
                });
            }
            if region.tag.is_empty() {
                return Err(ConfigError::InvalidRegion {
                    reason: format!("empty tag for volume '{volume}'"),
                });
            }
        }
        if self.policy.elastic_process().is_empty() {
            return Err(ConfigError::EmptyElasticProcess);
        }
        Ok(())
    }

    /// Resolve the worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`; auto-detection uses
    /// `available_parallelism` clamped to `[1, 16]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, 16),
        }
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        let config = file.into_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

// ── TOML schema ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    model: Option<String>,
    output: Option<PathBuf>,
    workers: Option<usize>,
    batch_size: Option<usize>,
    step_column: Option<bool>,
    recoil: Option<RecoilSection>,
    regions: Option<Vec<RegionEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecoilSection {
    #[serde(default)]
    markers: Vec<String>,
    elastic_process: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionEntry {
    volume: String,
    tag: Option<String>,
    #[serde(default)]
    instanced: bool,
}

impl ConfigFile {
    fn into_config(self) -> Result<RunConfig, ConfigError> {
        let defaults = RunConfig::default();
        let model = match self.model {
            Some(m) => m.parse()?,
            None => defaults.model,
        };
        let policy = match self.recoil {
            Some(section) => {
                let elastic = section
                    .elastic_process
                    .unwrap_or_else(|| DEFAULT_ELASTIC_PROCESS.to_string());
                section
                    .markers
                    .into_iter()
                    .fold(RecoilPolicy::new(elastic), |p, m| p.with_marker(m))
            }
            None => defaults.policy,
        };
        let regions = match self.regions {
            Some(entries) => {
                let mut table = RegionTable::empty();
                for entry in entries {
                    let kind = if entry.instanced {
                        RegionKind::Instanced
                    } else {
                        RegionKind::Bulk
                    };
                    let tag = entry.tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
                    table.insert(entry.volume, tag, kind);
                }
                table
            }
            None => defaults.regions,
        };
        Ok(RunConfig {
            model,
            output_path: self.output,
            policy,
            regions,
            worker_count: self.workers,
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            step_column: self.step_column.unwrap_or(defaults.step_column),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = RunConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.model, ScintillatorModel::NaI);
        assert_eq!(c.regions.len(), 2);
    }

    #[test]
    fn model_parses_case_insensitively() {
        assert_eq!("NaI".parse::<ScintillatorModel>(), Ok(ScintillatorModel::NaI));
        assert_eq!("csi".parse::<ScintillatorModel>(), Ok(ScintillatorModel::CsI));
        assert_eq!(" CSI ".parse::<ScintillatorModel>(), Ok(ScintillatorModel::CsI));
        let err = "BGO".parse::<ScintillatorModel>().unwrap_err();
        assert!(err.to_string().contains("BGO"));
    }

    #[test]
    fn unrecognised_model_is_not_treated_as_csi() {
        for value in ["LaBr3", "NaI(Tl)", ""] {
            assert_eq!(
                value.parse::<ScintillatorModel>(),
                Err(ConfigError::UnknownModel {
                    value: value.to_string()
                })
            );
        }
    }

    #[test]
    fn zero_batch_rejected() {
        let c = RunConfig {
            batch_size: 0,
            ..RunConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::BatchSizeZero));
    }

    #[test]
    fn zero_workers_rejected() {
        let c = RunConfig {
            worker_count: Some(0),
            ..RunConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::WorkerCountZero));
    }

    #[test]
    fn empty_regions_rejected() {
        let c = RunConfig {
            regions: RegionTable::empty(),
            ..RunConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::NoRegions));
    }

    #[test]
    fn empty_tag_rejected() {
        let mut regions = RegionTable::empty();
        regions.insert("Veto", "", RegionKind::Bulk);
        let c = RunConfig {
            regions,
            ..RunConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidRegion { .. })));
    }

    #[test]
    fn empty_elastic_process_rejected() {
        let c = RunConfig {
            policy: RecoilPolicy::new(""),
            ..RunConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::EmptyElasticProcess));
    }

    #[test]
    fn worker_count_clamped() {
        let c = RunConfig {
            worker_count: Some(500),
            ..RunConfig::default()
        };
        assert_eq!(c.resolved_worker_count(), 64);
        let auto = RunConfig::default().resolved_worker_count();
        assert!((1..=16).contains(&auto));
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c = RunConfig::from_toml_str("").unwrap();
        assert_eq!(c, RunConfig::default());
    }

    #[test]
    fn full_toml_round_trip() {
        let text = r#"
            model = "CsI"
            output = "out/event.csv"
            workers = 3
            batch_size = 64
            step_column = true

            [recoil]
            markers = ["Xe", "Ar"]

            [[regions]]
            volume = "Xecylinder"
            tag = "Xe"

            [[regions]]
            volume = "Scintor"
            tag = "scintor"
            instanced = true

            [[regions]]
            volume = "Veto"
        "#;
        let c = RunConfig::from_toml_str(text).unwrap();
        assert_eq!(c.model, ScintillatorModel::CsI);
        assert_eq!(c.output_path, Some(PathBuf::from("out/event.csv")));
        assert_eq!(c.worker_count, Some(3));
        assert_eq!(c.batch_size, 64);
        assert!(c.step_column);
        assert_eq!(c.policy.markers().collect::<Vec<_>>(), vec!["Xe", "Ar"]);
        assert_eq!(c.policy.elastic_process(), "hadElastic");
        assert_eq!(c.regions.len(), 3);
        assert_eq!(c.regions.lookup("Veto").unwrap().tag, "default");
        assert_eq!(
            c.regions.lookup("Scintor").unwrap().kind,
            RegionKind::Instanced
        );
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = RunConfig::from_toml_str("modle = \"NaI\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn bad_model_in_toml() {
        let err = RunConfig::from_toml_str("model = \"LaBr3\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownModel { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = RunConfig::from_toml_file("/nonexistent/lxe.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
