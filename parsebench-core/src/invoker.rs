//! Process Invocation
//!
//! Runs one target against one input as an isolated child process, enforcing
//! a timeout and capturing stdout/stderr. Every failure mode - launch error,
//! nonzero exit, timeout - is returned as a failed [`Sample`]; nothing here
//! aborts a sweep. The child is always reaped before [`invoke`] returns.

use crate::{Sample, Target};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// How often the child is polled for termination.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Invoke `target` once against `input` with the given timeout.
///
/// Wall-clock time is measured from just before process start to just after
/// termination; command-line construction is excluded. On timeout the child
/// is killed and reaped, and the sample records the timeout bound as its
/// elapsed time.
pub fn invoke(target: &Target, input: &Path, timeout: Duration) -> Sample {
    let args = target.command_args(input);

    let mut command = Command::new(&target.program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let start = Instant::now();
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(target_name = %target.name, error = %e, "launch failed");
            return Sample::failed(
                start.elapsed(),
                format!("failed to launch {}: {}", target.program.display(), e),
            );
        }
    };

    // Drain both pipes on background threads so a chatty child cannot
    // deadlock against a full pipe buffer.
    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => {
                reap(&mut child);
                join_output(stdout_handle);
                join_output(stderr_handle);
                return Sample::failed(start.elapsed(), format!("failed to poll process: {}", e));
            }
        }

        if start.elapsed() >= timeout {
            tracing::debug!(target_name = %target.name, ?timeout, "timeout, killing process");
            reap(&mut child);
            join_output(stdout_handle);
            join_output(stderr_handle);
            return Sample::failed(timeout, format!("timeout: exceeded {:?}", timeout));
        }

        std::thread::sleep(POLL_INTERVAL);
    };
    let elapsed = start.elapsed();

    let stdout = join_output(stdout_handle);
    let stderr = join_output(stderr_handle);

    if status.success() {
        Sample::ok(elapsed, target.metric_rule.extract(&stdout))
    } else {
        let stderr = stderr.trim();
        let diagnostic = if stderr.is_empty() {
            format!("process exited with {}", status)
        } else {
            stderr.to_string()
        };
        Sample::failed(elapsed, diagnostic)
    }
}

/// Read a pipe to EOF on a background thread.
fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<String>> {
    stream.map(|mut stream| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            // A read error leaves whatever arrived before it.
            let _ = stream.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_output(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Kill and wait. Safe to call on an already-exited child.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
