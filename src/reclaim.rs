//! Forceful port reclaim after a failed graceful shutdown.
//!
//! Which OS utility does the reclaiming is a capability question answered
//! once at startup: Linux boxes with `fuser` get the one-shot
//! `fuser -k <port>/tcp`, everything else gets an `lsof` listing with
//! direct signals to the owning PIDs.

use std::io;
use std::process::Command;

use tracing::{debug, warn};

/// Seam over the OS-level "terminate whatever owns this port" step.
pub trait PortReclaimer {
    /// Best-effort reclaim; callers ignore the error beyond logging it.
    fn reclaim(&self, port: u16) -> io::Result<()>;
}

/// Reclaim mechanism resolved from the host's capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimStrategy {
    /// Linux `fuser -k <port>/tcp`.
    Fuser,
    /// Portable fallback: `lsof -t` to find owning PIDs, then signal them.
    Lsof,
}

impl ReclaimStrategy {
    /// Probe the host once and pick the strategy for the whole run.
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") && command_exists("fuser") {
            ReclaimStrategy::Fuser
        } else {
            ReclaimStrategy::Lsof
        }
    }
}

impl PortReclaimer for ReclaimStrategy {
    fn reclaim(&self, port: u16) -> io::Result<()> {
        match self {
            ReclaimStrategy::Fuser => reclaim_with_fuser(port),
            ReclaimStrategy::Lsof => reclaim_with_lsof(port),
        }
    }
}

/// Check if a command exists in the system PATH.
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn reclaim_with_fuser(port: u16) -> io::Result<()> {
    // Argument list is explicit; the port is a validated integer, never a
    // shell-interpolated string.
    let output = Command::new("fuser")
        .arg("-k")
        .arg(format!("{port}/tcp"))
        .output()?;

    if output.status.success() {
        debug!(port, "fuser killed the remaining listener");
    } else {
        // fuser exits non-zero when nothing holds the port
        debug!(port, "fuser found no process holding the port");
    }
    Ok(())
}

fn reclaim_with_lsof(port: u16) -> io::Result<()> {
    let output = Command::new("lsof")
        .args(["-t", "-i"])
        .arg(format!("TCP:{port}"))
        .arg("-sTCP:LISTEN")
        .output()?;

    if !output.status.success() {
        // lsof exits non-zero when it finds nothing
        debug!(port, "lsof found no listener on the port");
        return Ok(());
    }

    for field in String::from_utf8_lossy(&output.stdout).split_whitespace() {
        let Ok(pid) = field.parse::<u32>() else {
            continue;
        };
        kill_listener(port, pid);
    }
    Ok(())
}

#[cfg(unix)]
fn kill_listener(port: u16, pid: u32) {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        Ok(()) => debug!(port, pid, "killed remaining listener"),
        // Already gone between the lsof listing and the signal
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => warn!(port, pid, error = %e, "failed to kill listener"),
    }
}

#[cfg(not(unix))]
fn kill_listener(port: u16, pid: u32) {
    let status = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .output();
    match status {
        Ok(o) if o.status.success() => debug!(port, pid, "killed remaining listener"),
        Ok(_) => debug!(port, pid, "taskkill found no such process"),
        Err(e) => warn!(port, pid, error = %e, "failed to run taskkill"),
    }
}
