// MCP server loop over a line-delimited transport.
//
// Each incoming line is one JSON-RPC message. Requests are handled on their
// own tasks so a slow Slack call does not hold up the rest; responses are
// written as they complete, each carrying the id of its request.
// Notifications are handled without a response.

use crate::error::TransportError;
use crate::handler::McpHandler;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Longest request line accepted before it is discarded.
const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

/// MCP server that reads requests from a transport and dispatches them.
pub struct McpServer {
    handler: Arc<McpHandler>,
}

impl McpServer {
    pub fn new(handler: McpHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Serve on the process's stdin and stdout.
    pub async fn serve_stdio(&self) -> Result<(), TransportError> {
        self.run(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Run until the reader reaches EOF, then wait for in-flight calls and
    /// flush their responses.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<(), TransportError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(tools = self.handler.registry().len(), "MCP server running");

        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_lines(writer, rx));
        let mut in_flight = JoinSet::new();

        let read_result = loop {
            let line = match lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    warn!(limit = MAX_LINE_LENGTH, "discarding oversized message");
                    send(
                        &tx,
                        &JsonRpcResponse::error(
                            Value::Null,
                            JsonRpcError::parse_error("message too long"),
                        ),
                    );
                    continue;
                }
                Some(Err(LinesCodecError::Io(e))) => {
                    break Err(TransportError::Read(e.to_string()));
                }
                None => {
                    info!("input closed, shutting down");
                    break Ok(());
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => {
                    debug!(method = %request.method, id = ?request.id, "received request");
                    let handler = Arc::clone(&self.handler);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        if let Some(response) = handler.handle(request).await {
                            send(&tx, &response);
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "failed to parse JSON-RPC message");
                    send(
                        &tx,
                        &JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e)),
                    );
                }
            }

            while let Some(joined) = in_flight.try_join_next() {
                log_task_failure(joined);
            }
        };

        while let Some(joined) = in_flight.join_next().await {
            log_task_failure(joined);
        }

        // Last sender gone: the writer drains what is queued and stops.
        drop(tx);
        let write_result = writer_task.await?;

        read_result.and(write_result)
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if tx.send(json).is_err() {
                warn!(id = %response.id, "output closed, dropping response");
            }
        }
        Err(e) => error!(error = %e, "failed to serialize response"),
    }
}

fn log_task_failure(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "request task failed");
    }
}

async fn write_lines<W>(
    writer: W,
    mut rx: mpsc::UnboundedReceiver<String>,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, LinesCodec::new());

    while let Some(line) = rx.recv().await {
        sink.send(line)
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
    }

    Ok(())
}
