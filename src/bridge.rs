//! Client for the external save-reading bridge: a standalone binary that
//! parses a `.sav` file and prints JSON. Every invocation is bounded by a
//! timeout; per-box reads are cached by (save path, box index, mode).

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio::process::Command;

/// Seconds per bridge invocation (`BRIDGE_TIMEOUT` env).
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Output tag prefix the bridge must report; older builds are rejected.
const BRIDGE_TAG_PREFIX: &str = "pc-probed-v7";

/// File names probed when the configured path is a directory.
const BRIDGE_CANDIDATES: &[&str] = &["savebridge", "SaveBridge", "savebridge.exe"];

#[derive(Debug)]
pub enum BridgeError {
    /// No bridge binary at the configured path.
    MissingBinary(PathBuf),
    /// The invocation exceeded the timeout.
    TimedOut(u64),
    /// The bridge process could not be spawned or read.
    Io(std::io::Error),
    /// The bridge exited with a non-zero status.
    Failed { code: Option<i32>, stderr: String },
    /// The bridge printed something that is not JSON.
    InvalidOutput(String),
    /// The bridge is too old for this app.
    OutdatedTag(String),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::MissingBinary(path) => {
                write!(f, "No bridge binary found at {}", path.display())
            }
            BridgeError::TimedOut(secs) => {
                write!(f, "The bridge did not answer within {}s", secs)
            }
            BridgeError::Io(e) => write!(f, "Could not run the bridge: {}", e),
            BridgeError::Failed { code, stderr } => match code {
                Some(code) => write!(f, "Bridge failed ({}): {}", code, stderr),
                None => write!(f, "Bridge was killed: {}", stderr),
            },
            BridgeError::InvalidOutput(e) => {
                write!(f, "Bridge output is not valid JSON: {}", e)
            }
            BridgeError::OutdatedTag(tag) => write!(
                f,
                "Bridge is outdated (tag '{}'); '{}*' is required",
                tag, BRIDGE_TAG_PREFIX
            ),
        }
    }
}

impl std::error::Error for BridgeError {}

fn timeout_from_env() -> Duration {
    let secs = std::env::var("BRIDGE_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

type BoxCacheKey = (String, u32, Option<String>);

/// Handle to a loaded bridge binary.
#[derive(Debug)]
pub struct SaveBridge {
    exe: PathBuf,
    timeout: Duration,
    cache: Mutex<HashMap<BoxCacheKey, Value>>,
}

impl SaveBridge {
    /// Resolve and load the bridge binary. A directory path is probed for
    /// the known binary names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let mut exe = path.as_ref().to_path_buf();
        if exe.is_dir() {
            if let Some(found) = BRIDGE_CANDIDATES
                .iter()
                .map(|name| exe.join(name))
                .find(|p| p.exists())
            {
                exe = found;
            }
        }
        if !exe.exists() {
            return Err(BridgeError::MissingBinary(exe));
        }
        log::info!("save bridge loaded from {}", exe.display());
        Ok(Self {
            exe,
            timeout: timeout_from_env(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<BoxCacheKey, Value>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn run(&self, args: &[String]) -> Result<Value, BridgeError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.exe).args(args).output(),
        )
        .await
        .map_err(|_| BridgeError::TimedOut(self.timeout.as_secs()))?
        .map_err(BridgeError::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(BridgeError::Failed {
                code: output.status.code(),
                stderr: if stderr.is_empty() {
                    "unknown bridge error".to_string()
                } else {
                    stderr
                },
            });
        }
        serde_json::from_slice(&output.stdout)
            .map_err(|e| BridgeError::InvalidOutput(e.to_string()))
    }

    /// Open a save for its general data (trainer, party). Verifies the
    /// bridge tag so a stale binary is caught early.
    pub async fn open_save(
        &self,
        save_path: &str,
        mode: Option<&str>,
    ) -> Result<Value, BridgeError> {
        let mut args = vec![save_path.to_string()];
        if let Some(mode) = mode.filter(|m| !m.eq_ignore_ascii_case("auto")) {
            args.push("--mode".to_string());
            args.push(mode.to_string());
        }
        let data = self.run(&args).await?;
        let tag = data
            .get("BridgeTag")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .to_string();
        if !tag.starts_with(BRIDGE_TAG_PREFIX) {
            return Err(BridgeError::OutdatedTag(tag));
        }
        Ok(data)
    }

    /// Read one storage box, going through the (save, box, mode) cache.
    pub async fn read_box(
        &self,
        save_path: &str,
        box_index: u32,
        mode: Option<&str>,
    ) -> Result<Value, BridgeError> {
        let mode = mode
            .filter(|m| !m.eq_ignore_ascii_case("auto"))
            .map(|m| m.to_string());
        let key: BoxCacheKey = (save_path.to_string(), box_index, mode.clone());
        if let Some(hit) = self.lock_cache().get(&key).cloned() {
            return Ok(hit);
        }

        let mut args = vec![
            save_path.to_string(),
            "--box".to_string(),
            box_index.to_string(),
        ];
        if let Some(mode) = &mode {
            args.push("--mode".to_string());
            args.push(mode.clone());
        }
        let data = self.run(&args).await?;
        self.lock_cache().insert(key, data.clone());
        Ok(data)
    }
}
