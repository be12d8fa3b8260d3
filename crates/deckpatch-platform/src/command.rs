use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// Minimum wait for pipe EOF after the child exits.
const OUTPUT_GRACE: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

/// Exit status and both output streams of a finished process.
#[derive(Debug, Clone)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner.current_dir(dir);
        self
    }

    /// Run to completion, capturing stdout and stderr.
    ///
    /// With `timeout` set, the child is killed and reaped once the deadline
    /// passes and [`Error::TimedOut`] is returned. `None` waits indefinitely.
    ///
    /// Output is read until the pipes close. A grandchild that inherited them
    /// can hold them open after the child exits; reading then stops at the
    /// deadline and returns what arrived so far.
    pub fn capture(mut self, timeout: Option<Duration>) -> Result<Captured> {
        debug!(cmd = %self.program, args = ?self.inner.get_args().collect::<Vec<_>>(), "spawning");

        let mut child = self
            .inner
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::CommandFailed {
                cmd: self.program.clone(),
                source: e,
            })?;

        // drained on their own threads so a chatty child cannot fill a pipe and stall
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Some(limit) = timeout {
                if started.elapsed() >= limit {
                    warn!(cmd = %self.program, secs = limit.as_secs(), "killing unresponsive process");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::TimedOut {
                        cmd: self.program,
                        after: limit,
                    });
                }
            }
            thread::sleep(POLL_INTERVAL);
        };

        let deadline = timeout.map(|limit| (started + limit).max(Instant::now() + OUTPUT_GRACE));
        let captured = Captured {
            status,
            stdout: collect(stdout, deadline),
            stderr: collect(stderr, deadline),
        };
        debug!(cmd = %self.program, code = ?captured.code(), "process exited");
        Ok(captured)
    }
}

/// Pipe contents read so far, and a signal sent at EOF.
struct Drain {
    buf:  Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Drain {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let (tx, done) = mpsc::channel();
    let sink = Arc::clone(&buf);
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => sink.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(&chunk[..n]),
            }
        }
        let _ = tx.send(());
    });
    Drain { buf, done }
}

fn collect(drain: Option<Drain>, deadline: Option<Instant>) -> String {
    let Some(drain) = drain else {
        return String::new();
    };
    let closed = match deadline {
        Some(deadline) => drain
            .done
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .is_ok(),
        None => drain.done.recv().is_ok(),
    };
    if !closed {
        debug!("output pipe still open at deadline; keeping partial output");
    }
    let bytes = std::mem::take(&mut *drain.buf.lock().unwrap_or_else(PoisonError::into_inner));
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("7z");
        assert_eq!(cmd.program(), "7z");
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("7z").arg("u").args(["-y", "Balatro.exe"]);
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args, ["u", "-y", "Balatro.exe"]);
    }

    #[test]
    fn test_command_current_dir() {
        let cmd = Command::new("7z").current_dir("/tmp/staging");
        assert_eq!(cmd.inner.get_current_dir(), Some(Path::new("/tmp/staging")));
    }

    #[test]
    fn test_command_missing_program() {
        let result = Command::new("deckpatch_nonexistent_binary_12345").capture(None);
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_both_streams_and_code() {
        let captured = Command::new("sh")
            .args(["-c", "echo out; echo err 1>&2; exit 3"])
            .capture(None)
            .unwrap();
        assert!(!captured.success());
        assert_eq!(captured.code(), Some(3));
        assert_eq!(captured.stdout.trim(), "out");
        assert_eq!(captured.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_runs_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let captured = Command::new("sh")
            .args(["-c", "cat marker.txt"])
            .current_dir(dir.path())
            .capture(Some(Duration::from_secs(30)))
            .unwrap();
        assert!(captured.success());
        assert_eq!(captured.stdout, "here");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_timeout_kills_child() {
        let started = Instant::now();
        let result = Command::new("sleep")
            .arg("30")
            .capture(Some(Duration::from_millis(200)));
        assert!(matches!(result, Err(Error::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_does_not_wait_on_inherited_pipes() {
        let started = Instant::now();
        let captured = Command::new("sh")
            .args(["-c", "sleep 30 & echo done"])
            .capture(Some(Duration::from_secs(1)))
            .unwrap();
        assert!(captured.success());
        assert_eq!(captured.stdout.trim(), "done");
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
