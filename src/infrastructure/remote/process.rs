//! Child process runner with a wall-clock deadline.
//!
//! Stdin is fed and output drained on their own threads so a full pipe can
//! never block us while we poll for exit. Each output line is also logged at
//! debug.

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exit status and captured streams of a finished child.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// -1 when the child was killed by a signal
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// stdout then stderr, as one block
    pub fn combined(&self) -> String {
        match (self.stdout.trim_end().is_empty(), self.stderr.trim_end().is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }
}

#[derive(Debug)]
pub enum ProcessError {
    Spawn(std::io::Error),
    TimedOut(Duration),
}

/// Run `cmd` to completion, feeding `input` on stdin, killing it after `timeout`.
pub fn run_with_deadline(
    mut cmd: Command,
    input: Option<&str>,
    timeout: Duration,
) -> Result<ProcessOutput, ProcessError> {
    cmd.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(ProcessError::Spawn)?;

    let stdout = drain(child.stdout.take(), "stdout");
    let stderr = drain(child.stderr.take(), "stderr");

    let feeder = feed(child.stdin.take(), input);

    let status = wait_until(&mut child, timeout)?;
    if let Some(handle) = feeder {
        let _ = handle.join();
    }

    Ok(ProcessOutput {
        status,
        stdout: join(stdout),
        stderr: join(stderr),
    })
}

fn wait_until(child: &mut Child, timeout: Duration) -> Result<i32, ProcessError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.code().unwrap_or(-1)),
            Ok(None) if Instant::now() >= deadline => {
                warn!("child exceeded {timeout:?}, killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::TimedOut(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(ProcessError::Spawn(e)),
        }
    }
}

/// Write `input` from its own thread so a child that never reads stdin
/// cannot hold us past the deadline.
fn feed(stdin: Option<ChildStdin>, input: Option<&str>) -> Option<JoinHandle<()>> {
    let mut stdin = stdin?;
    let input = input?.to_string();
    Some(thread::spawn(move || {
        // A child that exits early closes the pipe; its exit status
        // tells the real story.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            debug!("stdin write failed: {e}");
        }
    }))
}

fn drain<R: Read + Send + 'static>(
    stream: Option<R>,
    label: &'static str,
) -> Option<JoinHandle<String>> {
    let stream = stream?;
    Some(thread::spawn(move || {
        let mut collected = String::new();
        for line in BufReader::new(stream).lines().map_while(Result::ok) {
            debug!(target: "hoist::remote", "[{label}] {line}");
            collected.push_str(&line);
            collected.push('\n');
        }
        collected
    }))
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
