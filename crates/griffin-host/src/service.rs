//! The host task.
//!
//! One tokio task owns the `TabHost` and serializes everything that
//! touches it: shell commands, config reloads, the reclaimer's sweep
//! tick and the bounds debounce deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use griffin_common::EngineError;
use griffin_config::GriffinConfig;
use griffin_webview::RenderEngine;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::commands::{HostCommand, HostUpdate};
use crate::host::TabHost;

/// Wake-up used when no bounds update is pending. The branch is disabled
/// in that case, so the value only has to be valid.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

pub enum HostRequest {
    Command(HostCommand),
    ConfigReloaded(Box<GriffinConfig>),
    Shutdown(oneshot::Sender<()>),
}

/// Receives every state push and error report from the host task.
pub type UpdateSink = Arc<dyn Fn(HostUpdate) + Send + Sync>;

/// Cloneable sender side of a running `HostService`.
#[derive(Clone)]
pub struct HostHandle {
    tx: mpsc::UnboundedSender<HostRequest>,
}

impl HostHandle {
    /// Queue a command. Returns false once the host task is gone.
    pub fn send(&self, command: HostCommand) -> bool {
        self.tx.send(HostRequest::Command(command)).is_ok()
    }

    pub fn config_reloaded(&self, config: GriffinConfig) -> bool {
        self.tx
            .send(HostRequest::ConfigReloaded(Box::new(config)))
            .is_ok()
    }

    /// Ask the host to tear down and wait until it has.
    pub async fn shutdown(&self) {
        let (reply, done) = oneshot::channel();
        if self.tx.send(HostRequest::Shutdown(reply)).is_ok() {
            let _ = done.await;
        }
    }
}

pub struct HostService<E: RenderEngine> {
    host: TabHost<E>,
    requests: mpsc::UnboundedReceiver<HostRequest>,
    updates: UpdateSink,
}

impl<E: RenderEngine> HostService<E> {
    pub fn new(host: TabHost<E>, updates: UpdateSink) -> (Self, HostHandle) {
        let (tx, requests) = mpsc::unbounded_channel();
        (
            Self {
                host,
                requests,
                updates,
            },
            HostHandle { tx },
        )
    }

    /// Run until shutdown is requested or every handle is dropped. The
    /// host is torn down either way.
    pub async fn run(mut self) {
        if let Err(e) = self.host.init().await {
            self.report(e);
        }
        self.publish_state();

        let mut sweep = tokio::time::interval(self.host.reclaimer().interval());
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        sweep.tick().await;

        loop {
            let deadline = self.host.next_bounds_deadline();
            let wake = deadline
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(|| tokio::time::Instant::now() + IDLE_WAIT);

            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(HostRequest::Command(command)) => self.execute(command).await,
                    Some(HostRequest::ConfigReloaded(config)) => {
                        self.host.apply_config(&config);
                        self.publish_state();
                    }
                    Some(HostRequest::Shutdown(reply)) => {
                        self.host.shutdown().await;
                        let _ = reply.send(());
                        return;
                    }
                    None => {
                        tracing::debug!("All host handles dropped");
                        self.host.shutdown().await;
                        return;
                    }
                },
                _ = sweep.tick() => {
                    if !self.host.sweep(Utc::now()).await.is_empty() {
                        self.publish_state();
                    }
                }
                _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                    match self.host.poll_bounds(Instant::now()).await {
                        Ok(()) => self.publish_state(),
                        Err(e) => self.report(e),
                    }
                }
            }
        }
    }

    async fn execute(&mut self, command: HostCommand) {
        let geometry = command.is_geometry();
        if geometry {
            tracing::trace!(?command, "Host command");
        } else {
            tracing::debug!(?command, "Host command");
        }

        match self.host.handle(command).await {
            Ok(()) if geometry => {}
            Ok(()) => self.publish_state(),
            Err(e) => self.report(e),
        }
    }

    fn publish_state(&self) {
        (self.updates)(HostUpdate::State(Box::new(self.host.shell_state())));
    }

    fn report(&self, error: EngineError) {
        tracing::error!(error = %error, "Surface operation failed");
        (self.updates)(HostUpdate::Error(error.to_string()));
        self.publish_state();
    }
}
