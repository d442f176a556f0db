//! Background lexing.
//!
//! Requests carry a text snapshot and the revision it was taken at. Each one
//! runs on Tokio's blocking pool; completions come back over an unbounded
//! channel in completion order, which is not necessarily submission order.
//! Whoever owns the document compares the completion's revision with the
//! current one before applying anything.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tracing::{debug, trace, warn};

use crate::{LexError, LexOutput, Lexer};

/// Snapshot submitted for lexing. `K` identifies the document.
#[derive(Debug, Clone)]
pub struct LexRequest<K> {
    pub key: K,
    pub revision: u64,
    pub text: String,
    pub lexer: Arc<dyn Lexer>,
}

#[derive(Debug)]
pub struct LexCompletion<K> {
    pub key: K,
    pub revision: u64,
    pub outcome: Result<LexOutput, LexError>,
}

pub struct LexService<K> {
    runtime: Handle,
    tx: mpsc::UnboundedSender<LexCompletion<K>>,
    rx: mpsc::UnboundedReceiver<LexCompletion<K>>,
}

impl<K> LexService<K>
where
    K: Send + std::fmt::Debug + 'static,
{
    pub fn new(runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { runtime, tx, rx }
    }

    /// Dispatch `request` to a blocking worker. Fire and forget; the handle is
    /// only useful to tests that want to wait for the send.
    pub fn submit(&self, request: LexRequest<K>) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let LexRequest {
            key,
            revision,
            text,
            lexer,
        } = request;
        trace!(target: "lexer.service", ?key, revision, chars = text.len(), lexer = lexer.name(), "submit");
        self.runtime.spawn(async move {
            let lexer_name = lexer.name();
            let outcome = match task::spawn_blocking(move || lexer.tokenize(&text)).await {
                Ok(result) => result,
                Err(join_err) => {
                    warn!(target: "lexer.service", ?join_err, lexer = lexer_name, "lex_task_join_failed");
                    Err(LexError::Aborted { lexer: lexer_name })
                }
            };
            if let Err(e) = tx.send(LexCompletion {
                key,
                revision,
                outcome,
            }) {
                debug!(target: "lexer.service", key = ?e.0.key, "completion_receiver_dropped");
            }
        })
    }

    /// Wait for the next completion.
    pub async fn next_completion(&mut self) -> Option<LexCompletion<K>> {
        self.rx.recv().await
    }

    /// Completion already waiting, if any.
    pub fn try_next_completion(&mut self) -> Option<LexCompletion<K>> {
        self.rx.try_recv().ok()
    }
}
