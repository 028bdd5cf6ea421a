use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use pwm_argparse::OptionRegistry;
use serde::Serialize;

pub const TARGETS: &[&str] = &["stdout", "file"];

/// Where a rendered request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// From `--target` and `-o`; giving `-o` implies `--target file`.
    pub fn from_registry(registry: &OptionRegistry) -> Result<Self> {
        let out = registry.get_short("o")?;
        if out.is_present() {
            return Ok(Self::File(PathBuf::from(out.value_as::<String>()?)));
        }
        let target: String = registry.get_long("target")?.value_as()?;
        match target.as_str() {
            "file" => bail!("--target file requires -o <out>"),
            _ => Ok(Self::Stdout),
        }
    }

    pub fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(value).context("failed to encode request")?;
        json.push('\n');
        match self {
            Self::Stdout => std::io::stdout()
                .write_all(json.as_bytes())
                .context("failed to write to stdout"),
            Self::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory: {}", parent.display())
                    })?;
                }
                fs::write(path, json)
                    .with_context(|| format!("failed to write output file `{}`", path.display()))?;
                tracing::info!(path = %path.display(), "wrote request");
                Ok(())
            }
        }
    }
}
