//! Trainer registry: the fixed roster of league members and their access codes.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One registered trainer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub name: String,
    /// Short login code handed out by the organizer.
    pub access_code: String,
}

/// The league's member registry. Names feed the tournament and league
/// constructors; codes back the login endpoint.
#[derive(Clone, Debug)]
pub struct Registry {
    trainers: Vec<Trainer>,
}

impl Registry {
    /// The default nine-trainer roster.
    pub fn builtin() -> Self {
        let trainers = [
            ("Aitana", "a07"),
            ("Bruno", "b42"),
            ("Carla", "c03"),
            ("Dario", "d88"),
            ("Elena", "e15"),
            ("Fabio", "f60"),
            ("Gema", "g09"),
            ("Hector", "h31"),
            ("Ivan", "i77"),
        ]
        .into_iter()
        .map(|(name, code)| Trainer {
            name: name.to_string(),
            access_code: code.to_string(),
        })
        .collect();
        Self { trainers }
    }

    /// Load a registry from a headerless two-column CSV (name, access code).
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut trainers = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let (Some(name), Some(code)) = (record.get(0), record.get(1)) {
                if !name.is_empty() {
                    trainers.push(Trainer {
                        name: name.to_string(),
                        access_code: code.to_string(),
                    });
                }
            }
        }
        Ok(Self { trainers })
    }

    /// Registry from the `REGISTRY_CSV` env path, or the built-in roster.
    pub fn from_env_or_builtin() -> Self {
        match std::env::var("REGISTRY_CSV") {
            Ok(path) => match Self::from_csv_path(&path) {
                Ok(reg) if !reg.trainers.is_empty() => reg,
                Ok(_) => {
                    log::warn!("registry file {} is empty; using the built-in roster", path);
                    Self::builtin()
                }
                Err(e) => {
                    log::warn!("could not read registry {}: {}; using the built-in roster", path, e);
                    Self::builtin()
                }
            },
            Err(_) => Self::builtin(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.trainers.iter().map(|t| t.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trainers.iter().any(|t| t.name == name)
    }

    /// Check a login attempt.
    pub fn verify(&self, name: &str, access_code: &str) -> bool {
        self.trainers
            .iter()
            .any(|t| t.name == name && t.access_code == access_code)
    }
}
