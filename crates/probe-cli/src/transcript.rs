//! Report output to stdout, mirrored to the dated log file

use chrono::Local;
use probe_core::{LogFileSettings, Transcript};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Prints the transcript and appends it to the log file when enabled
pub struct ConsoleTranscript {
    log_file: Option<(PathBuf, File)>,
}

impl ConsoleTranscript {
    /// Open today's log file per `settings`, or print only when disabled
    pub fn open(settings: &LogFileSettings) -> std::io::Result<Self> {
        if !settings.enabled {
            return Ok(Self { log_file: None });
        }

        let path = settings.path_for(&Local::now());
        let file = open_append(&path)?;
        info!("Writing transcript to {}", path.display());

        Ok(Self {
            log_file: Some((path, file)),
        })
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_ref().map(|(path, _)| path.as_path())
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl Transcript for ConsoleTranscript {
    fn write(&mut self, text: &str) {
        println!("{}", text);

        let failed = match &mut self.log_file {
            Some((path, file)) => match writeln!(file, "{}", text) {
                Ok(()) => false,
                Err(e) => {
                    warn!("Could not append to {}: {}", path.display(), e);
                    true
                }
            },
            None => false,
        };

        if failed {
            self.log_file = None;
        }
    }
}
