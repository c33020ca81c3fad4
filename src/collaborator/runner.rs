//! Collaborator subprocess runner.
//!
//! Executes the configured command with timeout, output capture, and error handling.
//!
//! On Unix the collaborator runs in its own process group so a timeout kills
//! everything it started, not only the direct child.

use super::{Collaborator, CollaboratorOutput, Invocation};
use crate::config::CollaboratorConfig;
use crate::error::{ClipforgeError, Result};
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

/// How long to wait for output pipes after a timeout kill.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Runs the collaborator as a child process.
#[derive(Debug, Clone)]
pub struct ProcessCollaborator {
    program: String,
    base_args: Vec<String>,
    working_dir: Option<PathBuf>,
    environment: BTreeMap<String, String>,
    timeout: Duration,
}

impl ProcessCollaborator {
    /// Build a runner from config.
    pub fn from_config(config: &CollaboratorConfig) -> Result<Self> {
        let mut argv = config.argv()?;
        let program = argv.remove(0);

        Ok(Self {
            program,
            base_args: argv,
            working_dir: config.working_dir.as_ref().map(PathBuf::from),
            environment: config.environment.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Command line for logs (without the payload).
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.base_args.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ProcessCollaborator {
    fn spawn_error(&self, e: io::Error, invocation: &Invocation) -> ClipforgeError {
        if is_argument_list_too_long(&e) {
            let bytes: usize = invocation.args().iter().map(String::len).sum();
            return ClipforgeError::ProcessingFailed(format!(
                "request is {} bytes, exceeds the OS argument limit ({})",
                bytes, e
            ));
        }
        ClipforgeError::UserError(format!(
            "failed to execute collaborator '{}': {}\n\
             Fix: set collaborator.command in the config to an installed program.",
            self.program, e
        ))
    }
}

#[cfg(unix)]
fn is_argument_list_too_long(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::E2BIG)
}

/// ERROR_FILENAME_EXCED_RANGE: command line longer than 32767 characters.
#[cfg(windows)]
fn is_argument_list_too_long(e: &io::Error) -> bool {
    e.raw_os_error() == Some(206)
}

#[cfg(not(any(unix, windows)))]
fn is_argument_list_too_long(_e: &io::Error) -> bool {
    false
}

impl Collaborator for ProcessCollaborator {
    fn run(&self, invocation: &Invocation) -> Result<CollaboratorOutput> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        // The child's pid becomes the group id.
        #[cfg(unix)]
        {
            command.process_group(0);
        }

        // Merge environment variables
        for (key, value) in &self.environment {
            command.env(key, value);
        }

        tracing::info!(
            command = %self.command_line(),
            request = %invocation.describe(),
            "spawning collaborator"
        );

        let start_time = Instant::now();
        let mut child = command
            .spawn()
            .map_err(|e| self.spawn_error(e, invocation))?;

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe.
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let (exit_code, timed_out) = wait_with_timeout(&mut child, self.timeout)?;
        let duration = start_time.elapsed();

        // A killed collaborator's own children may still hold the pipes open.
        let deadline = timed_out.then(|| Instant::now() + DRAIN_GRACE);
        let stdout = join_drain(stdout_reader, deadline);
        let stderr = join_drain(stderr_reader, deadline);

        tracing::info!(
            exit_code = ?exit_code,
            timed_out,
            elapsed_ms = duration.as_millis() as u64,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "collaborator finished"
        );

        Ok(CollaboratorOutput {
            stdout,
            stderr,
            exit_code,
            duration,
            timed_out,
        })
    }
}

/// Read a pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

/// Collect a drained pipe. With a deadline, a reader still blocked when it
/// passes is abandoned and its output dropped.
fn join_drain(handle: Option<JoinHandle<Vec<u8>>>, deadline: Option<Instant>) -> String {
    let Some(handle) = handle else {
        return String::new();
    };

    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                tracing::debug!("output pipe still open after kill, not waiting for it");
                return String::new();
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    handle
        .join()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok((status.code(), false));
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    tracing::warn!(timeout_secs = timeout.as_secs(), "collaborator timed out");
                    kill_process(child);
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(ClipforgeError::UserError(format!(
                    "failed to check collaborator status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process (and on Unix its whole process group) and reap it.
fn kill_process(child: &mut Child) {
    #[cfg(unix)]
    {
        // Negative pid targets the group created with process_group(0).
        // Safety: kill() is a plain syscall with no memory-safety concerns.
        let rc = unsafe { libc::kill(-(child.id() as libc::pid_t), libc::SIGKILL) };
        if rc != 0 {
            tracing::debug!(error = %io::Error::last_os_error(), "killing process group failed");
        }
    }
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}
