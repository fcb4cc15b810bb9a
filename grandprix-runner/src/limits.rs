//! Platform-specific resource limit handling for the sandbox child.

use tokio::process::Command;

/// Hard bounds applied to every sandboxed invocation. The artifact is fully
/// untrusted: it may attempt arbitrary I/O or allocation, and only these
/// bounds (plus the wall-clock timeout in the runner) are assumed to hold.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    /// Address-space ceiling (RLIMIT_AS), bytes.
    pub max_memory_bytes: Option<u64>,
    /// CPU-time ceiling (RLIMIT_CPU), seconds.
    pub max_cpu_seconds: Option<u64>,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_memory_bytes: Some(512 * 1024 * 1024),
            max_cpu_seconds: Some(120),
        }
    }
}

impl ResourceLimits {
    pub fn unlimited() -> Self {
        Self {
            max_memory_bytes: None,
            max_cpu_seconds: None,
        }
    }

    pub fn with_memory_bytes(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    pub fn with_cpu_seconds(mut self, seconds: u64) -> Self {
        self.max_cpu_seconds = Some(seconds);
        self
    }
}

/// Apply Unix rlimits to the child between fork and exec.
#[cfg(unix)]
pub(crate) fn apply_unix_limits(cmd: &mut Command, limits: &ResourceLimits) {
    let max_memory = limits.max_memory_bytes;
    let max_cpu = limits.max_cpu_seconds;

    // SAFETY: pre_exec runs between fork() and exec() in the child. The
    // closure only calls the async-signal-safe setsid and setrlimit, and
    // the captured values are Copy, so no shared mutable state crosses the
    // fork.
    unsafe {
        cmd.pre_exec(move || {
            // Lead a fresh session: a timeout kill of the process group
            // then reaps anything the artifact spawned, not just the
            // driver.
            libc::setsid();

            if let Some(mem) = max_memory {
                let limit = libc::rlimit {
                    rlim_cur: mem,
                    rlim_max: mem,
                };
                libc::setrlimit(libc::RLIMIT_AS, &limit);
            }

            if let Some(cpu) = max_cpu {
                let limit = libc::rlimit {
                    rlim_cur: cpu,
                    rlim_max: cpu,
                };
                libc::setrlimit(libc::RLIMIT_CPU, &limit);
            }

            Ok(())
        });
    }
}

#[cfg(not(unix))]
pub(crate) fn apply_unix_limits(_cmd: &mut Command, _limits: &ResourceLimits) {
    // Rlimits are unavailable off Unix; the wall-clock timeout still holds.
}
