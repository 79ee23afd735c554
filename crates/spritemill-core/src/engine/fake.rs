//! A scripted fake engine for stage and orchestrator tests.
//!
//! Records every call for post-hoc assertions and can be configured to time
//! out, fail a specific tag export, or touch the artifact files an
//! invocation declares (so tests can assert on-disk outputs with tempdirs).

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::types::SpriteMetadata;

use super::{EngineInvocation, MetadataExtraction, SpriteEngine};

/// One recorded call against the fake.
#[derive(Debug, Clone)]
pub enum FakeCall {
    Run(Vec<String>),
    Script {
        name: String,
        input: PathBuf,
        params: Vec<(String, String)>,
    },
    Extract(PathBuf),
}

pub struct FakeEngine {
    metadata: Mutex<SpriteMetadata>,
    extract_error: Option<String>,
    script_times_out: bool,
    fail_tag: Option<String>,
    touch_outputs: bool,
    applies_normalization: bool,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeEngine {
    pub fn with_metadata(metadata: SpriteMetadata) -> Self {
        Self {
            metadata: Mutex::new(metadata),
            extract_error: None,
            script_times_out: false,
            fail_tag: None,
            touch_outputs: false,
            applies_normalization: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create the files named by `--sheet`, `--data`, and `saveOutput`
    /// arguments, as the real engine would.
    pub fn touching_outputs(mut self) -> Self {
        self.touch_outputs = true;
        self
    }

    /// Make every `run_script` call report a timeout.
    pub fn with_script_timeout(mut self) -> Self {
        self.script_times_out = true;
        self
    }

    /// Make the sheet export for one tag fail with a nonzero exit.
    pub fn failing_tag(mut self, tag: &str) -> Self {
        self.fail_tag = Some(tag.to_string());
        self
    }

    /// Have `run_script` rewrite the stored metadata's frame durations to
    /// the `targetMs` parameter, the way the real normalize script does, so
    /// a later extraction observes the normalized timings.
    pub fn applying_normalization(mut self) -> Self {
        self.applies_normalization = true;
        self
    }

    /// Make metadata extraction fail as a launch error.
    pub fn with_extract_error(mut self, message: &str) -> Self {
        self.extract_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: FakeCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    fn touch(path: &str) {
        std::fs::write(path, b"").expect("fake engine failed to touch output");
    }

    fn ok_invocation(command: String) -> EngineInvocation {
        EngineInvocation {
            command,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
            timed_out: false,
        }
    }
}

#[async_trait]
impl SpriteEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn run(&self, args: &[String]) -> EngineResult<EngineInvocation> {
        self.record(FakeCall::Run(args.to_vec()));
        let command = format!("fake {}", args.join(" "));

        if let (Some(fail_tag), Some(tag)) = (&self.fail_tag, Self::arg_value(args, "--tag")) {
            if tag == fail_tag {
                return Ok(EngineInvocation {
                    command,
                    stdout: String::new(),
                    stderr: format!("sheet export failed for tag {tag}"),
                    exit_code: Some(1),
                    timed_out: false,
                });
            }
        }

        if self.touch_outputs {
            for flag in ["--sheet", "--data"] {
                if let Some(path) = Self::arg_value(args, flag) {
                    Self::touch(path);
                }
            }
        }

        Ok(Self::ok_invocation(command))
    }

    async fn run_script(
        &self,
        script: &str,
        input: &Path,
        params: &[(String, String)],
    ) -> EngineResult<EngineInvocation> {
        self.record(FakeCall::Script {
            name: script.to_string(),
            input: input.to_path_buf(),
            params: params.to_vec(),
        });
        let command = format!("fake --script {script}");

        if self.script_times_out {
            return Ok(EngineInvocation {
                command,
                timed_out: true,
                ..EngineInvocation::default()
            });
        }

        if self.applies_normalization {
            if let Some((_, value)) = params.iter().find(|(key, _)| key == "targetMs") {
                if let Ok(target_ms) = value.parse::<u32>() {
                    let mut metadata = self.metadata.lock().unwrap();
                    for frame in &mut metadata.frames {
                        frame.duration_ms = target_ms;
                    }
                }
            }
        }

        if self.touch_outputs {
            if let Some((_, path)) = params.iter().find(|(key, _)| key == "saveOutput") {
                Self::touch(path);
            }
        }

        Ok(Self::ok_invocation(command))
    }

    async fn extract_metadata(&self, input: &Path) -> EngineResult<MetadataExtraction> {
        self.record(FakeCall::Extract(input.to_path_buf()));

        if let Some(message) = &self.extract_error {
            return Err(EngineError::Launch {
                binary: PathBuf::from("fake"),
                message: message.clone(),
            });
        }

        Ok(MetadataExtraction {
            metadata: self.metadata.lock().unwrap().clone(),
            invocation: Self::ok_invocation(format!("fake --batch {} --list-tags", input.display())),
        })
    }
}
