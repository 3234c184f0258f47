use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

#[derive(Debug)]
pub struct RunGuard {
    lock_path: PathBuf,
    released: Arc<AtomicBool>,
}

pub fn default_lock_path() -> PathBuf {
    std::env::temp_dir().join("flatshift.lock")
}

impl RunGuard {
    pub fn acquire(lock_path: PathBuf) -> Result<Self> {
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                let detail = fs::read_to_string(&lock_path)
                    .ok()
                    .map(|raw| raw.trim().to_string())
                    .filter(|pid| !pid.is_empty())
                    .map(|pid| format!(" (pid={pid})"))
                    .unwrap_or_default();
                return Err(anyhow!(
                    "another migration run is already in progress{detail}; remove {} if that run is no longer alive",
                    lock_path.display()
                ));
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to claim run lock: {}", lock_path.display())
                });
            }
        };

        file.write_all(format!("{}\n", std::process::id()).as_bytes())
            .with_context(|| format!("failed to write run lock: {}", lock_path.display()))?;

        Ok(Self {
            lock_path,
            released: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = fs::remove_file(&self.lock_path);
    }

    pub fn install_signal_release(&self) -> Result<()> {
        let lock_path = self.lock_path.clone();
        let released = Arc::clone(&self.released);
        ctrlc::set_handler(move || {
            if !released.swap(true, Ordering::SeqCst) {
                let _ = fs::remove_file(&lock_path);
            }
            std::process::exit(1);
        })
        .context("failed to install signal handler for run lock release")
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.release();
    }
}
