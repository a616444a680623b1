//! Provenance records: which build, inputs and parameters produced a report.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Body of `<stem>.provenance.json` and of the `report` command.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Sidecar {
    pub code_rev: String,
    pub version: &'static str,
    pub inputs: Vec<String>,
    pub params: Value,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsite: Option<Callsite>,
}

impl Sidecar {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: code_rev(),
            version: quadmax::VERSION,
            inputs: Vec::new(),
            params,
            outputs: Vec::new(),
            callsite: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Record `artifact` as the output and write the sidecar next to it.
    #[track_caller]
    pub fn write_next_to(mut self, artifact: &Path) -> Result<PathBuf> {
        let caller = Location::caller();
        self.callsite = Some(Callsite {
            file: caller.file(),
            line: caller.line(),
        });
        self.outputs.push(artifact.display().to_string());
        let path = sidecar_path(artifact);
        let bytes = serde_json::to_vec_pretty(&self)?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `dir/report.json` -> `dir/report.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn code_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
