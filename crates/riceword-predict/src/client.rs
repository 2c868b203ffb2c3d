//! Prediction client over the engine's stdio pipes
//!
//! The client owns one engine process and answers queries over a strict
//! one-line-in, one-line-out protocol. At most one query is outstanding at a
//! time: concurrent callers are serialized through a bounded FIFO request
//! queue, and the next decoded output line always answers the oldest pending
//! query. A session that loses its process degrades to empty responses and is
//! never restarted automatically; a fresh `start()` is the caller's decision.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, error, info, warn};

use riceword_completion::WordPredictor;

use crate::error::{PredictError, Result};
use crate::process;
use crate::types::{ClientState, EngineConfig};

/// Buffered engine output lines not yet claimed by a query
const LINE_BUFFER: usize = 16;

/// A query waiting for the engine's next output line
struct PendingQuery {
    text: String,
    respond: oneshot::Sender<String>,
}

/// Handles into one spawned engine process
///
/// Each `start()` produces a fresh session with its own state handle, so a
/// late task from a replaced session can never touch its successor.
struct Session {
    state: Arc<RwLock<ClientState>>,
    requests: mpsc::Sender<PendingQuery>,
    shutdown: Option<oneshot::Sender<()>>,
}

/// The client's view of its session history
enum SessionSlot {
    /// start() has never been called
    Uninitialized,
    /// The last session is gone and nothing replaced it
    Terminated,
    /// A session exists; its state says whether it still accepts queries
    Live(Session),
}

/// Client for the external word-prediction engine
///
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct PredictionClient {
    config: EngineConfig,
    session: RwLock<SessionSlot>,
}

impl PredictionClient {
    /// Create a client for the given engine configuration
    ///
    /// No process is spawned until [`start`](Self::start) is called.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: RwLock::new(SessionSlot::Uninitialized),
        }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current session state
    pub async fn state(&self) -> ClientState {
        match &*self.session.read().await {
            SessionSlot::Uninitialized => ClientState::Uninitialized,
            SessionSlot::Terminated => ClientState::Terminated,
            SessionSlot::Live(session) => *session.state.read().await,
        }
    }

    /// Spawn the engine and begin decoding its output
    ///
    /// Allowed unless a live session is already accepting queries; restarting
    /// after termination is a caller responsibility, never automatic. On
    /// spawn failure the session transitions straight to `Terminated` and
    /// every subsequent query returns an empty result.
    pub async fn start(&self) -> Result<()> {
        let mut slot = self.session.write().await;
        if let SessionSlot::Live(session) = &*slot {
            if *session.state.read().await == ClientState::Ready {
                return Err(PredictError::AlreadyRunning);
            }
        }

        if self.config.executable_on_path().is_none() {
            warn!(
                executable = %self.config.executable,
                "Prediction engine executable not found on PATH"
            );
        }

        let state = Arc::new(RwLock::new(ClientState::Starting));

        let mut child = match process::spawn_engine(&self.config) {
            Ok(child) => child,
            Err(e) => {
                *slot = SessionSlot::Terminated;
                error!(
                    executable = %self.config.executable,
                    error = %e,
                    "Failed to start prediction engine"
                );
                return Err(e);
            }
        };

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            process::terminate_engine(&mut child).await;
            *slot = SessionSlot::Terminated;
            return Err(PredictError::SpawnFailed(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "engine stdio streams were not captured",
            )));
        };

        let (lines_tx, lines_rx) = mpsc::channel(LINE_BUFFER);
        let (request_tx, request_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(run_reader(stdout, lines_tx));
        tokio::spawn(run_stderr_drain(stderr));
        tokio::spawn(run_correlator(
            request_rx,
            stdin,
            lines_rx,
            Arc::clone(&state),
            self.config.timeout_ms,
        ));
        tokio::spawn(run_exit_watcher(child, shutdown_rx, Arc::clone(&state)));

        *state.write().await = ClientState::Ready;
        *slot = SessionSlot::Live(Session {
            state,
            requests: request_tx,
            shutdown: Some(shutdown_tx),
        });

        Ok(())
    }

    /// Send one query line and wait for the engine's next response line
    ///
    /// Returns the raw line, which may be blank when the engine has no
    /// predictions. When the session is uninitialized or terminated, or the
    /// response wait exceeds the configured bound, an empty string comes back
    /// instead; failures never propagate to the caller.
    pub async fn query(&self, text: &str) -> String {
        match self.run_query(text).await {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "Prediction query degraded to empty result");
                String::new()
            }
        }
    }

    async fn run_query(&self, text: &str) -> Result<String> {
        let sender = {
            let slot = self.session.read().await;
            let SessionSlot::Live(session) = &*slot else {
                return Err(PredictError::Unavailable);
            };
            if *session.state.read().await != ClientState::Ready {
                return Err(PredictError::Unavailable);
            }
            session.requests.clone()
        };

        let (respond, response) = oneshot::channel();
        sender
            .send(PendingQuery {
                text: text.to_owned(),
                respond,
            })
            .await
            .map_err(|_| PredictError::Unavailable)?;

        response.await.map_err(|_| PredictError::Unavailable)
    }

    /// Terminate the session and kill the engine process
    ///
    /// Idempotent; pending queries resolve empty.
    pub async fn shutdown(&self) {
        let mut slot = self.session.write().await;
        if let SessionSlot::Live(session) = &mut *slot {
            if let Some(tx) = session.shutdown.take() {
                let _ = tx.send(());
            }
            *slot = SessionSlot::Terminated;
        }
    }
}

#[async_trait]
impl WordPredictor for PredictionClient {
    async fn predict(&self, query: &str) -> String {
        self.query(query).await
    }
}

/// Decode engine stdout into discrete lines
///
/// `\n` and `\r\n` terminators are both accepted. Ends on EOF or when the
/// session drops its line receiver.
async fn run_reader(stdout: ChildStdout, lines: mpsc::Sender<String>) {
    let mut reader = BufReader::new(stdout).lines();
    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                if lines.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                debug!("Prediction engine output stream closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to decode prediction engine output");
                break;
            }
        }
    }
}

/// Log engine stderr so a chatty engine cannot fill its pipe
async fn run_stderr_drain(stderr: ChildStderr) {
    let mut reader = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = reader.next_line().await {
        debug!(line = %line, "Prediction engine stderr");
    }
}

/// Serialize queries and correlate each with the next output line
///
/// One request is in flight at a time; the bounded request channel queues the
/// rest in FIFO order, so a second caller's write can never overtake the
/// first caller's response.
async fn run_correlator(
    mut requests: mpsc::Receiver<PendingQuery>,
    mut stdin: ChildStdin,
    mut lines: mpsc::Receiver<String>,
    state: Arc<RwLock<ClientState>>,
    timeout_ms: u64,
) {
    while let Some(PendingQuery { text, respond }) = requests.recv().await {
        let mut payload = text.into_bytes();
        payload.push(b'\n');

        let wrote = match stdin.write_all(&payload).await {
            Ok(()) => stdin.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = wrote {
            warn!(error = %e, "Failed to write query to prediction engine");
            *state.write().await = ClientState::Terminated;
            let _ = respond.send(String::new());
            break;
        }

        match tokio::time::timeout(Duration::from_millis(timeout_ms), lines.recv()).await {
            Ok(Some(line)) => {
                // Ignore send error if the caller gave up waiting; the
                // line-per-query pairing stays intact either way.
                let _ = respond.send(line);
            }
            Ok(None) => {
                debug!("Prediction engine closed its output mid-query");
                *state.write().await = ClientState::Terminated;
                let _ = respond.send(String::new());
                break;
            }
            Err(_) => {
                warn!(
                    error = %PredictError::Timeout { timeout_ms },
                    "Prediction engine did not answer in time"
                );
                *state.write().await = ClientState::Terminated;
                let _ = respond.send(String::new());
                break;
            }
        }
    }
    // Queued requests beyond this point are dropped with their response
    // channels, resolving their callers empty.
}

/// Watch for process exit and mark the session terminated
///
/// A non-zero exit is reported as a malformed environment: the engine exits
/// that way when its data set is missing or unreadable.
async fn run_exit_watcher(
    mut child: Child,
    mut shutdown: oneshot::Receiver<()>,
    state: Arc<RwLock<ClientState>>,
) {
    let exited = tokio::select! {
        status = child.wait() => Some(status),
        _ = &mut shutdown => None,
    };

    match exited {
        Some(status) => {
            *state.write().await = ClientState::Terminated;
            match status {
                Ok(status) if status.success() => {
                    info!("Prediction engine exited");
                }
                Ok(status) => match status.code() {
                    Some(code) => {
                        warn!(
                            error = %PredictError::MalformedEnvironment { code },
                            "Prediction engine exited with failure"
                        );
                    }
                    None => {
                        warn!(
                            error = %PredictError::ProcessExited { code: None },
                            "Prediction engine killed by signal"
                        );
                    }
                },
                Err(e) => {
                    error!(error = %e, "Failed to wait on prediction engine");
                }
            }
        }
        None => {
            process::terminate_engine(&mut child).await;
            *state.write().await = ClientState::Terminated;
        }
    }
}
