//! Sequential per-port stop procedure.
//!
//! For each target port: probe occupancy, send the service-level shutdown
//! directive, give the process a grace period to exit, then hand the port
//! to the forceful reclaimer if it is still held.

use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ports::{BASE_PORTS, is_port_free, target_port};
use crate::reclaim::PortReclaimer;

/// How long a service gets to exit after the shutdown directive.
const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Service-level graceful shutdown directive, behind a seam for tests.
pub trait ShutdownClient {
    fn send_shutdown(&self, port: u16) -> io::Result<()>;
}

/// Production client: asks the Redis instance on the port to shut itself
/// down via `redis-cli`.
pub struct RedisCliClient;

impl ShutdownClient for RedisCliClient {
    fn send_shutdown(&self, port: u16) -> io::Result<()> {
        // SHUTDOWN drops the connection, so redis-cli usually exits
        // non-zero even when the server obeys. Only a spawn failure means
        // the directive was not delivered.
        let status = Command::new("redis-cli")
            .args(["-h", "127.0.0.1", "-p"])
            .arg(port.to_string())
            .args(["shutdown", "nosave"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        debug!(port, code = ?status.code(), "shutdown directive sent");
        Ok(())
    }
}

/// What happened to a single target port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOutcome {
    /// The probe bind succeeded: the port was free before this run.
    /// Reported to the user as "already closed".
    AlreadyClosed,
    /// The port was occupied and this run issued the stop sequence.
    Closed,
}

/// Drives the stop sequence over the bench port family.
pub struct PortStopper<'a> {
    shutdown: &'a dyn ShutdownClient,
    reclaimer: &'a dyn PortReclaimer,
    grace_period: Duration,
}

impl<'a> PortStopper<'a> {
    pub fn new(shutdown: &'a dyn ShutdownClient, reclaimer: &'a dyn PortReclaimer) -> Self {
        Self {
            shutdown,
            reclaimer,
            grace_period: GRACE_PERIOD,
        }
    }

    #[cfg(test)]
    fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Stop whatever listens on `port`.
    ///
    /// The probing listener is scoped inside `is_port_free`, so it is
    /// released on every path before any command runs.
    pub fn stop_port(&self, port: u16) -> PortOutcome {
        if is_port_free(port) {
            debug!(port, "port already free, nothing to stop");
            return PortOutcome::AlreadyClosed;
        }

        if let Err(e) = self.shutdown.send_shutdown(port) {
            warn!(port, error = %e, "could not deliver shutdown directive");
        }

        thread::sleep(self.grace_period);

        if !is_port_free(port) {
            // Best effort: a failed reclaim is logged, never propagated.
            if let Err(e) = self.reclaimer.reclaim(port) {
                warn!(port, error = %e, "forceful reclaim failed");
            }
        }

        PortOutcome::Closed
    }

    /// Stop all five target ports for `suffix`, in fixed order, and print
    /// the per-port and completion lines.
    pub fn stop_all(&self, suffix: char) {
        let mut already_closed = 0usize;
        let mut closed = 0usize;

        for base in BASE_PORTS {
            let port = target_port(base, suffix);
            match self.stop_port(port) {
                PortOutcome::AlreadyClosed => {
                    already_closed += 1;
                    println!("Port {port} already closed");
                }
                PortOutcome::Closed => {
                    closed += 1;
                    println!("Port {port} was closed");
                }
            }
        }

        info!(closed, already_closed, "port sweep finished");
        println!("bench stopped");
    }
}
