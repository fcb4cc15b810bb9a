use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{RunnerError, RunnerResult};
use crate::limits::{apply_unix_limits, ResourceLimits};

/// Stdlib-only Python driver shipped with the runner; one copy is written
/// to the scratch directory of every invocation.
const DRIVER_SOURCE: &str = include_str!("driver.py");

/// Runner configuration. One runner may serve many concurrent evaluations;
/// every invocation gets its own subprocess and scratch directory, so no
/// execution state leaks between submissions.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Python interpreter used for the sandbox child.
    pub interpreter: PathBuf,
    pub limits: ResourceLimits,
    /// Wall-clock budget per invocation, enforced with kill-on-expiry.
    pub wall_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("python3"),
            limits: ResourceLimits::default(),
            wall_timeout: Duration::from_secs(120),
        }
    }
}

/// One task-appropriate entry-point invocation.
#[derive(Debug, Clone)]
pub enum Invocation {
    /// Run `preprocess_data` over `input_csv`, writing the transformed
    /// table to `output_csv`.
    Preprocess {
        input_csv: PathBuf,
        output_csv: PathBuf,
    },
    /// Run `train_model` then `evaluate_model` in the same child; the
    /// trained model handle is opaque and never crosses the process
    /// boundary.
    TrainEvaluate {
        train_csv: PathBuf,
        test_csv: PathBuf,
        target: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Preprocess { rows: u64 },
    TrainEvaluate { metric: f64, model_type: String },
}

#[derive(Debug, Deserialize)]
struct DriverReply {
    status: String,
    kind: Option<String>,
    message: Option<String>,
    metric: Option<f64>,
    model_type: Option<String>,
    rows: Option<u64>,
}

/// Executes untrusted submission artifacts out of process, under CPU,
/// memory and wall-clock bounds.
#[derive(Debug, Clone, Default)]
pub struct SandboxRunner {
    config: RunnerConfig,
}

impl SandboxRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Load the artifact into an isolated child and invoke the entry points
    /// the invocation names. Missing entry points and syntax errors surface
    /// here as `Load`, at call time, matching dynamic-loading semantics.
    pub async fn run(&self, artifact: &Path, invocation: &Invocation) -> RunnerResult<RunOutcome> {
        let scratch = tempfile::tempdir()
            .map_err(|e| RunnerError::Spawn(format!("scratch dir: {}", e)))?;
        let driver_path = scratch.path().join("driver.py");
        std::fs::write(&driver_path, DRIVER_SOURCE)
            .map_err(|e| RunnerError::Spawn(format!("driver install: {}", e)))?;

        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(&driver_path).arg(artifact);
        match invocation {
            Invocation::Preprocess {
                input_csv,
                output_csv,
            } => {
                cmd.arg("preprocess").arg(input_csv).arg(output_csv);
            }
            Invocation::TrainEvaluate {
                train_csv,
                test_csv,
                target,
            } => {
                cmd.arg("train_evaluate")
                    .arg(train_csv)
                    .arg(test_csv)
                    .arg(target);
            }
        }

        cmd.current_dir(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        apply_unix_limits(&mut cmd, &self.config.limits);

        let start = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| RunnerError::Spawn(e.to_string()))?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            match stdout_pipe {
                Some(pipe) => read_capped(pipe).await,
                None => String::new(),
            }
        });
        let stderr_task = tokio::spawn(async move {
            match stderr_pipe {
                Some(pipe) => read_capped(pipe).await,
                None => String::new(),
            }
        });

        let status = match timeout(self.config.wall_timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                return Err(RunnerError::Spawn(format!("wait failed: {}", e)));
            }
            Err(_) => {
                kill_process_tree(&mut child).await;
                tracing::warn!(
                    artifact = %artifact.display(),
                    budget_s = self.config.wall_timeout.as_secs(),
                    "Sandbox killed on wall-clock timeout"
                );
                return Err(RunnerError::Timeout(self.config.wall_timeout.as_secs()));
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        tracing::debug!(
            artifact = %artifact.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            exit = ?status.code(),
            "Sandbox exited"
        );

        if let Some(err) = classify_signal(&status) {
            return Err(err);
        }

        // The driver's reply is the last non-empty stdout line; anything the
        // artifact printed before it is ignored.
        let reply_line = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty());

        let Some(line) = reply_line else {
            return Err(RunnerError::Runtime(format!(
                "Sandbox produced no reply (exit {:?}): {}",
                status.code(),
                tail(&stderr)
            )));
        };

        let reply: DriverReply = serde_json::from_str(line).map_err(|_| {
            RunnerError::Protocol(format!(
                "Unparseable sandbox reply {:?} (stderr: {})",
                line,
                tail(&stderr)
            ))
        })?;

        if reply.status == "ok" {
            return self.decode_outcome(invocation, reply);
        }

        let message = reply
            .message
            .unwrap_or_else(|| "sandbox reported an unnamed error".to_string());
        match reply.kind.as_deref() {
            Some("load") => Err(RunnerError::Load(message)),
            Some("memory") => Err(RunnerError::ResourceExceeded(message)),
            _ => Err(RunnerError::Runtime(message)),
        }
    }

    fn decode_outcome(
        &self,
        invocation: &Invocation,
        reply: DriverReply,
    ) -> RunnerResult<RunOutcome> {
        match invocation {
            Invocation::Preprocess { .. } => {
                let rows = reply.rows.ok_or_else(|| {
                    RunnerError::Protocol("preprocess reply missing row count".to_string())
                })?;
                Ok(RunOutcome::Preprocess { rows })
            }
            Invocation::TrainEvaluate { .. } => {
                let metric = reply.metric.ok_or_else(|| {
                    RunnerError::Protocol("train_evaluate reply missing metric".to_string())
                })?;
                let model_type = reply
                    .model_type
                    .unwrap_or_else(|| "unknown".to_string());
                Ok(RunOutcome::TrainEvaluate { metric, model_type })
            }
        }
    }
}

/// Per-pipe capture ceiling. Only the trailing reply line and a short
/// stderr tail are ever used, so the head of a chatty artifact's output is
/// dropped rather than buffered.
const CAPTURE_LIMIT: usize = 64 * 1024;

/// Drain a child pipe to EOF, keeping only the last `CAPTURE_LIMIT` bytes.
/// The pipe must be read in full regardless or the child blocks on a full
/// buffer.
async fn read_capped<R>(mut pipe: R) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut kept = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                kept.extend_from_slice(&chunk[..n]);
                if kept.len() > CAPTURE_LIMIT {
                    kept.drain(..kept.len() - CAPTURE_LIMIT);
                }
            }
        }
    }
    String::from_utf8_lossy(&kept).into_owned()
}

/// Kill the sandbox child and everything it spawned. The child leads its
/// own process group (setsid in pre_exec), so signalling the negative pid
/// reaches the artifact's subprocesses too.
#[cfg(unix)]
async fn kill_process_tree(child: &mut tokio::process::Child) {
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }
    let _ = child.kill().await;
}

#[cfg(not(unix))]
async fn kill_process_tree(child: &mut tokio::process::Child) {
    let _ = child.kill().await;
}

/// Death by SIGKILL (out-of-memory kill) or SIGXCPU (CPU rlimit) counts as
/// a resource failure; other signals read as runtime faults.
#[cfg(unix)]
fn classify_signal(status: &std::process::ExitStatus) -> Option<RunnerError> {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(libc::SIGKILL) => Some(RunnerError::ResourceExceeded(
            "Sandbox killed (memory limit)".to_string(),
        )),
        Some(libc::SIGXCPU) => Some(RunnerError::ResourceExceeded(
            "Sandbox killed (CPU limit)".to_string(),
        )),
        Some(sig) => Some(RunnerError::Runtime(format!(
            "Sandbox terminated by signal {}",
            sig
        ))),
        None => None,
    }
}

#[cfg(not(unix))]
fn classify_signal(_status: &std::process::ExitStatus) -> Option<RunnerError> {
    None
}

fn tail(text: &str) -> String {
    const LIMIT: usize = 400;
    let trimmed = text.trim();
    if trimmed.len() <= LIMIT {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - LIMIT;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    trimmed[start..].to_string()
}
