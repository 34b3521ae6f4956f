//! TCP server speaking newline-delimited JSON-RPC.
//!
//! One task per connection. Requests on a connection are handled in order;
//! connections run concurrently. On shutdown the listener stops accepting,
//! each connection finishes the request it is working on, and `serve`
//! returns once all of them have closed.

use super::dispatcher::Dispatcher;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct RpcServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
}

impl RpcServer {
    pub async fn bind(addr: SocketAddr, dispatcher: Arc<Dispatcher>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` is cancelled.
    pub async fn serve(self, shutdown: CancellationToken) -> io::Result<()> {
        info!("Listening on {}", self.listener.local_addr()?);
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("Connection from {}", peer);
                        let dispatcher = self.dispatcher.clone();
                        let shutdown = shutdown.child_token();
                        connections.spawn(async move {
                            if let Err(e) = handle_connection(stream, dispatcher, shutdown).await {
                                debug!("Connection {} closed with error: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => warn!("Failed to accept connection: {}", e),
                },
                // Reap finished connections so the set does not grow unbounded.
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        info!(
            "Shutting down, waiting for {} connection(s)",
            connections.len()
        );
        while connections.join_next().await.is_some() {}
        Ok(())
    }
}

async fn handle_connection(
    stream: TcpStream,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
        };

        if line.trim().is_empty() {
            continue;
        }

        if let Some(mut response) = dispatcher.handle_line(&line).await {
            response.push('\n');
            write_half.write_all(response.as_bytes()).await?;
            write_half.flush().await?;
        }
    }

    write_half.shutdown().await
}
