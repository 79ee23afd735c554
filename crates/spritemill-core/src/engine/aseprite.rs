//! Aseprite engine collaborator over `tokio::process`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

use super::raw::parse_sheet_json;
use super::{EngineInvocation, MetadataExtraction, SpriteEngine};

/// The production sprite engine: Aseprite in batch mode.
pub struct AsepriteEngine {
    binary: PathBuf,
    script_dir: PathBuf,
    invocation_timeout: Duration,
}

impl AsepriteEngine {
    /// Create an engine from configuration, expanding `~` in paths.
    pub fn new(config: &EngineConfig) -> Self {
        let binary = expand(&config.binary);
        let script_dir = expand(&config.script_dir);
        Self {
            binary,
            script_dir,
            invocation_timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    fn render_command(&self, args: &[String]) -> String {
        let mut command = self.binary.display().to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    /// Unique-enough temp path for a metadata export, derived from the input
    /// name so concurrent runs on different files never collide.
    fn metadata_temp_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sprite");
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!(
            "{stem}-meta-{}-{nanos}.json",
            std::process::id()
        ))
    }
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

#[async_trait]
impl SpriteEngine for AsepriteEngine {
    fn name(&self) -> &str {
        "aseprite"
    }

    async fn run(&self, args: &[String]) -> EngineResult<EngineInvocation> {
        let command = self.render_command(args);
        tracing::debug!("Running engine: {command}");

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::Launch {
                binary: self.binary.clone(),
                message: e.to_string(),
            })?;

        match timeout(self.invocation_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let invocation = EngineInvocation {
                    command,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    exit_code: output.status.code(),
                    timed_out: false,
                };
                tracing::trace!(
                    "Engine exited with {:?} ({} bytes stdout)",
                    invocation.exit_code,
                    invocation.stdout.len()
                );
                Ok(invocation)
            }
            Ok(Err(e)) => Err(EngineError::Launch {
                binary: self.binary.clone(),
                message: e.to_string(),
            }),
            // The child is killed on drop; report the timeout as data.
            Err(_) => {
                tracing::warn!(
                    "Engine invocation timed out after {}ms: {command}",
                    self.invocation_timeout.as_millis()
                );
                Ok(EngineInvocation {
                    command,
                    timed_out: true,
                    ..EngineInvocation::default()
                })
            }
        }
    }

    async fn run_script(
        &self,
        script: &str,
        input: &Path,
        params: &[(String, String)],
    ) -> EngineResult<EngineInvocation> {
        let script_path = self.script_dir.join(script);

        let mut args = vec!["--batch".to_string(), input.display().to_string()];
        // Script params must precede --script for the engine to see them.
        for (key, value) in params {
            args.push("--script-param".to_string());
            args.push(format!("{key}={value}"));
        }
        args.push("--script".to_string());
        args.push(script_path.display().to_string());

        self.run(&args).await
    }

    async fn extract_metadata(&self, input: &Path) -> EngineResult<MetadataExtraction> {
        let temp_json = Self::metadata_temp_path(input);

        let args = vec![
            "--batch".to_string(),
            input.display().to_string(),
            "--data".to_string(),
            temp_json.display().to_string(),
            "--list-tags".to_string(),
            "--list-layers".to_string(),
        ];

        let invocation = self.run(&args).await?;
        if invocation.timed_out {
            return Err(EngineError::Timeout {
                command: invocation.command,
                timeout_ms: self.invocation_timeout.as_millis() as u64,
            });
        }

        let raw = tokio::fs::read_to_string(&temp_json)
            .await
            .map_err(|e| EngineError::MetadataRead {
                path: temp_json.clone(),
                message: e.to_string(),
            })?;
        let _ = tokio::fs::remove_file(&temp_json).await;

        let metadata = parse_sheet_json(&raw)?;
        Ok(MetadataExtraction {
            metadata,
            invocation,
        })
    }
}
