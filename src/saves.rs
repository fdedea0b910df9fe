//! Save-file bookkeeping: per-trainer directories of versioned `.sav`
//! uploads, newest first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Root directory for trainer saves (`SAVES_DIR` env, default `./saves`).
pub fn saves_root() -> PathBuf {
    std::env::var("SAVES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("saves"))
}

/// Create (if needed) and return the trainer's save directory.
pub fn ensure_user_dir(root: &Path, user: &str) -> io::Result<PathBuf> {
    let dir = root.join(user);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// One stored save file.
#[derive(Clone, Debug, Serialize)]
pub struct SaveFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// The trainer's `.sav` files, most recently modified first. The first
/// entry is the active save.
pub fn list_user_saves(root: &Path, user: &str) -> io::Result<Vec<SaveFile>> {
    let dir = ensure_user_dir(root, user)?;
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sav") {
            continue;
        }
        let meta = entry.metadata()?;
        let modified: DateTime<Utc> = meta.modified()?.into();
        out.push(SaveFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size: meta.len(),
            modified,
        });
    }
    out.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(out)
}

/// Timestamped file name for a new upload.
pub fn timestamped_name(user: &str) -> String {
    format!("{}_{}.sav", user, Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Human-readable byte count (B/KB/MB).
pub fn format_bytes(n: u64) -> String {
    if n < 1024 {
        format!("{} B", n)
    } else if n < 1024 * 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{:.2} MB", n as f64 / 1024.0 / 1024.0)
    }
}
