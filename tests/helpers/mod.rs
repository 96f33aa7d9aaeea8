// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use anyhow::Result;
use zypstrap::config::{Arch, BootstrapRequest};
use zypstrap::executor::{CaptureResult, CommandExecutor, CommandSpec, ExecutionResult};

/// How a recorded call went through the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Side-effecting call (`execute`).
    Execute,
    /// Output-returning query (`capture`).
    Capture,
}

/// One external call observed by the recording executor.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub command: String,
    pub args: Vec<String>,
}

impl RecordedCall {
    /// Renders the call as `command arg1 arg2` for compact assertions.
    pub fn rendered(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Test executor that records every call and never touches the system.
///
/// `capture` pops scripted results from a queue; when the queue is empty
/// it returns an empty success, mirroring a host with no matching state.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<RecordedCall>>,
    capture_outputs: Mutex<VecDeque<CaptureResult>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful output for the next `capture` call.
    pub fn push_capture_output(&self, output: impl Into<String>) {
        self.capture_outputs.lock().unwrap().push_back(CaptureResult {
            status: Some(ExitStatus::from_raw(0)),
            stdout: output.into(),
        });
    }

    /// Queues a failing result (exit code 1) for the next `capture`
    /// call, as `rpm -q` produces when no matching package is installed.
    pub fn push_capture_failure(&self, output: impl Into<String>) {
        self.capture_outputs.lock().unwrap().push_back(CaptureResult {
            status: Some(ExitStatus::from_raw(1 << 8)),
            stdout: output.into(),
        });
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// All recorded calls rendered as `command arg1 arg2` lines.
    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls().iter().map(RecordedCall::rendered).collect()
    }

    fn record(&self, kind: CallKind, spec: &CommandSpec) {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            command: spec.command.clone(),
            args: spec.args.clone(),
        });
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        self.record(CallKind::Execute, spec);
        Ok(ExecutionResult { status: None })
    }

    fn capture(&self, spec: &CommandSpec) -> Result<CaptureResult> {
        self.record(CallKind::Capture, spec);
        Ok(self
            .capture_outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CaptureResult {
                status: None,
                stdout: String::new(),
            }))
    }
}

/// Builds a request with the fields the dispatch tests care about.
///
/// Dry-run is set so the post-install finalizer (which edits files under
/// the root) stays out of call-sequence assertions; the executor is
/// exercised either way.
pub fn request(root: &str, distro: Option<&str>) -> BootstrapRequest {
    BootstrapRequest {
        root: root.into(),
        distro: distro.map(str::to_string),
        arch: Arch::X86_64,
        reg_code: None,
        root_pass: None,
        quiet: true,
        dry_run: true,
    }
}
