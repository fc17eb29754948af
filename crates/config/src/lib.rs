// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_SCHEMA_VERSION: &str = "1.0";

/// Default schema version for YAML jobs
fn default_schema_version() -> String {
    SUPPORTED_SCHEMA_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

/// Where the text to encode comes from. Exactly one field must be set.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct JobInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Stdout,
    File,
    /// Keep the output in memory; only echoed if `echo` is set.
    Capture,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct JobOutput {
    #[serde(default)]
    pub kind: OutputKind,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct JobLimits {
    /// Human-readable size, e.g. "4KB" or "512".
    #[serde(default)]
    pub max_output_bytes: Option<String>,
}

impl JobLimits {
    pub fn max_output_bytes(&self) -> Result<Option<u64>> {
        self.max_output_bytes
            .as_deref()
            .map(parse_size)
            .transpose()
            .context("Invalid limit 'max_output_bytes'")
    }
}

/// An encode job as described in YAML.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EncodeJob {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub input: JobInput,
    #[serde(default)]
    pub output: JobOutput,
    #[serde(default)]
    pub limits: JobLimits,
    /// Echo captured output to stdout.
    #[serde(default = "default_true")]
    pub echo: bool,
}

impl EncodeJob {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read encode job at {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let job: Self = serde_yaml::from_str(yaml).context("Failed to parse Encode Job YAML")?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SUPPORTED_SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SUPPORTED_SCHEMA_VERSION
            );
        }

        match (&self.input.text, &self.input.path) {
            (Some(_), Some(_)) => anyhow::bail!("Input must set only one of 'text' or 'path'"),
            (None, None) => anyhow::bail!("Input must set one of 'text' or 'path'"),
            (None, Some(path)) if path.trim().is_empty() => {
                anyhow::bail!("Input 'path' cannot be empty")
            }
            _ => {}
        }

        if self.output.kind == OutputKind::File
            && self.output.path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            anyhow::bail!("Output kind 'file' requires a non-empty 'path'");
        }
        if self.output.kind != OutputKind::File && self.output.path.is_some() {
            tracing::warn!(
                "Output 'path' is ignored for output kind {:?}",
                self.output.kind
            );
        }

        if self.limits.max_output_bytes()? == Some(0) {
            anyhow::bail!("Limit 'max_output_bytes' must be greater than zero");
        }

        Ok(())
    }

    /// Input path resolved against the directory holding the job file.
    pub fn input_path(&self, job_dir: &Path) -> Option<PathBuf> {
        self.input.path.as_deref().map(|p| job_dir.join(p))
    }

    /// Output file path resolved against the directory holding the job file.
    pub fn output_path(&self, job_dir: &Path) -> Option<PathBuf> {
        match self.output.kind {
            OutputKind::File => self.output.path.as_deref().map(|p| job_dir.join(p)),
            _ => None,
        }
    }
}

/// Parses a byte count: a bare integer or a human size such as "4KB".
pub fn parse_size(size_str: &str) -> Result<u64> {
    use human_size::{Byte, Size, SpecificSize};
    let trimmed = size_str.trim();
    if let Ok(bytes) = trimmed.parse::<u64>() {
        return Ok(bytes);
    }
    // human-size wants "<value> <unit>"; accept "4KB" as well as "4 KB".
    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (value, unit) = trimmed.split_at(split);
    let s: Size = format!("{} {}", value.trim(), unit.trim())
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid size format '{}': {}", size_str, e))?;
    let bytes: SpecificSize<Byte> = s.into();
    Ok(bytes.value() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_valid_job() {
        let yaml = r#"
schema_version: "1.0"
input:
  text: "SOS"
output:
  kind: file
  path: "out/morse.txt"
limits:
  max_output_bytes: "2048"
"#;
        let job = EncodeJob::from_yaml(yaml).unwrap();
        assert_eq!(job.input.text.as_deref(), Some("SOS"));
        assert_eq!(job.output.kind, OutputKind::File);
        assert_eq!(job.limits.max_output_bytes().unwrap(), Some(2048));
        assert!(job.echo);
        assert_eq!(
            job.output_path(Path::new("/jobs")),
            Some(PathBuf::from("/jobs/out/morse.txt"))
        );
    }

    #[test]
    fn test_defaults() {
        let job = EncodeJob::from_yaml("input:\n  path: message.txt\n").unwrap();
        assert_eq!(job.schema_version, "1.0");
        assert_eq!(job.output.kind, OutputKind::Stdout);
        assert_eq!(job.limits.max_output_bytes().unwrap(), None);
        assert_eq!(
            job.input_path(Path::new("jobs")),
            Some(PathBuf::from("jobs/message.txt"))
        );
        assert_eq!(job.output_path(Path::new("jobs")), None);
    }

    #[test]
    fn test_invalid_version() {
        let yaml = r#"
schema_version: "2.0"
input:
  text: "E"
"#;
        let err = EncodeJob::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_input_needs_exactly_one_source() {
        let err = EncodeJob::from_yaml("input: {}\n").unwrap_err();
        assert!(err.to_string().contains("one of"));

        let err = EncodeJob::from_yaml("input:\n  text: a\n  path: b\n").unwrap_err();
        assert!(err.to_string().contains("only one"));

        let err = EncodeJob::from_yaml("input:\n  path: \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_file_output_needs_path() {
        let yaml = r#"
input:
  text: "E"
output:
  kind: file
"#;
        let err = EncodeJob::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("requires a non-empty 'path'"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let yaml = r#"
input:
  text: "E"
limits:
  max_output_bytes: "0"
"#;
        let err = EncodeJob::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("max_output_bytes"));
    }

    #[test]
    fn test_bad_limit_format() {
        let yaml = r#"
input:
  text: "E"
limits:
  max_output_bytes: "lots"
"#;
        let err = EncodeJob::from_yaml(yaml).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid size format"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("512").unwrap(), 512);
        assert_eq!(parse_size("1 KiB").unwrap(), 1024);
        assert_eq!(parse_size("2KiB").unwrap(), 2048);
        assert!(parse_size("").is_err());
    }

    fn write_temp_file(prefix: &str, contents: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push("dotdash-config-tests");
        let _ = std::fs::create_dir_all(&dir);

        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = dir.join(format!("{}-{}.yaml", prefix, nonce));
        std::fs::write(&path, contents).expect("Failed to write temp file");
        path
    }

    #[test]
    fn test_job_from_file() {
        let path = write_temp_file(
            "job",
            r#"
schema_version: "1.0"
input:
  text: "CQ"
output:
  kind: capture
echo: false
"#,
        );

        let job = EncodeJob::from_file(&path).unwrap();
        assert_eq!(job.output.kind, OutputKind::Capture);
        assert!(!job.echo);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = EncodeJob::from_file("/nonexistent/dotdash-job.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read encode job"));
    }
}
