//! Log setup. The terminal UI owns stdout and stderr, so records go to a file.

use std::fs::{self, File};
use std::path::PathBuf;

use env_logger::{Env, Target};
use glyphswarm_config::Config;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GLYPHSWARM_LOG";

/// Path of the log file, under the platform cache directory.
pub fn log_path() -> Option<PathBuf> {
    Config::project_dirs().map(|dirs| dirs.cache_dir().join("glyphswarm.log"))
}

/// Install the logger. Logging stays off when the file cannot be created.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}
