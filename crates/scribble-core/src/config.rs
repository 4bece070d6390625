//! Training configuration management.
//!
//! This module provides configuration loading, global verbose flag
//! management, and the training hyperparameter defaults used when the
//! classifiers are trained at startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use serde::Deserialize;

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Candidate config file names searched on disk.
const CONFIG_FILENAMES: &[&str] = &["scribble.yml", "scribble.yaml"];

/// Training hyperparameters for the startup-trained classifiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingDefaults {
    /// Synthetic samples generated per class
    pub samples_per_class: usize,

    /// Full passes over the training set
    pub epochs: usize,

    /// Minibatch size for gradient updates
    pub batch_size: usize,

    /// SGD learning rate
    pub learning_rate: f32,

    /// Width of the hidden layer
    pub hidden_units: usize,

    /// Probability that a sample pixel is replaced by noise
    pub noise_rate: f32,

    /// Upper bound of injected noise values
    pub noise_level: f32,

    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for TrainingDefaults {
    fn default() -> Self {
        Self {
            samples_per_class: 100,
            epochs: 5,
            batch_size: 32,
            learning_rate: 0.05,
            hidden_units: 128,
            noise_rate: 0.1,
            noise_level: 0.3,
            seed: None,
        }
    }
}

impl TrainingDefaults {
    /// Clamp degenerate values back into usable ranges.
    pub fn sanitize(&mut self) {
        self.samples_per_class = self.samples_per_class.clamp(1, 10_000);
        self.epochs = self.epochs.clamp(1, 200);
        self.batch_size = self.batch_size.clamp(1, 1024);
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            self.learning_rate = Self::default().learning_rate;
        }
        self.hidden_units = self.hidden_units.clamp(1, 4096);
        self.noise_rate = self.noise_rate.clamp(0.0, 1.0);
        self.noise_level = self.noise_level.clamp(0.0, 1.0);
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ScribbleConfig {
    pub training: TrainingDefaults,
}

impl ScribbleConfig {
    fn sanitize(mut self) -> Self {
        self.training.sanitize();
        self
    }
}

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct ConfigHandle {
    pub config: ScribbleConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: ScribbleConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<ScribbleConfig>(&contents) {
                Ok(config) => {
                    let sanitized = config.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle::with_config(sanitized, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No config found; using built-in defaults.".to_string());
    ConfigHandle::with_config(ScribbleConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("SCRIBBLE_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("scribble").join(name));
        }
    }

    candidates
}

static CONFIG_HANDLE: OnceLock<ConfigHandle> = OnceLock::new();

/// Access the global configuration (loaded once per process).
pub fn config_handle() -> &'static ConfigHandle {
    CONFIG_HANDLE.get_or_init(|| load_config(None))
}

/// Report config source and warnings to stderr (only in verbose mode).
pub fn log_config_usage() {
    if !is_verbose() {
        return;
    }
    let handle = config_handle();
    if let Some(source) = &handle.source {
        eprintln!("[scribble] Loaded config from {}", source.display());
    } else {
        eprintln!("[scribble] Using built-in defaults");
    }

    for warning in &handle.warnings {
        eprintln!("[scribble] Config warning: {}", warning);
    }
}
