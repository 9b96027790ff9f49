//! Probe server
//!
//! Answers line-delimited JSON requests over TCP (one task per client) or
//! over any async reader/writer pair such as stdin/stdout. Requests are
//! independent: the core is pure, so clients share nothing but the config.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::core::{check_state, collide};
use crate::protocol::*;
use crate::types::DEFAULT_MIN_DISTANCE;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Squared collision radius used when a request does not carry one
    pub min_distance: i32,
    /// Serve stdin/stdout instead of TCP
    pub stdio: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7788,
            min_distance: DEFAULT_MIN_DISTANCE,
            stdio: false,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `BUBBLE_AI_HOST`: bind address (default "127.0.0.1")
    /// - `BUBBLE_AI_PORT`: port (default 7788)
    /// - `BUBBLE_MIN_DISTANCE`: squared collision radius (default 784)
    /// - `BUBBLE_AI_STDIO`: "1" or "true" to serve stdin/stdout
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("BUBBLE_AI_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("BUBBLE_AI_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let min_distance = lookup("BUBBLE_MIN_DISTANCE")
            .and_then(|s| s.trim().parse().ok())
            .filter(|d: &i32| *d > 0)
            .unwrap_or(defaults.min_distance);
        let stdio = lookup("BUBBLE_AI_STDIO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            host,
            port,
            min_distance,
            stdio,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Answer one request line
pub fn handle_line(line: &str, config: &ServerConfig) -> Reply {
    match parse_message(line) {
        Ok(ParsedMessage::Collide(msg)) => match msg.grid.to_grid() {
            Ok(grid) => {
                let min_distance = msg.min_distance.unwrap_or(config.min_distance);
                let position = crate::types::Point::new(msg.x, msg.y);
                Reply::Collision(create_collision(msg.seq, collide(position, &grid, min_distance)))
            }
            Err(e) => Reply::Error(create_error(
                Some(msg.seq),
                ErrorCode::InvalidGrid,
                &e.to_string(),
            )),
        },
        Ok(ParsedMessage::CheckState(msg)) => match msg.grid.to_grid() {
            Ok(grid) => {
                let states = check_state(msg.cell.into(), msg.color, &grid);
                Reply::State(create_state(msg.seq, &states))
            }
            Err(e) => Reply::Error(create_error(
                Some(msg.seq),
                ErrorCode::InvalidGrid,
                &e.to_string(),
            )),
        },
        Ok(ParsedMessage::Ping(msg)) => Reply::Pong(create_pong(msg.seq)),
        Ok(ParsedMessage::Unknown(msg)) => Reply::Error(create_error(
            msg.seq,
            ErrorCode::UnknownType,
            &format!("unknown message type: {}", msg.msg_type),
        )),
        Err(e) => Reply::Error(create_error(
            extract_seq(line),
            ErrorCode::InvalidJson,
            &e.to_string(),
        )),
    }
}

/// Serve requests from `reader` until EOF, writing one reply per request
///
/// Blank lines are skipped. Returns the number of replies written.
pub async fn serve_lines<R, W>(reader: R, mut writer: W, config: &ServerConfig) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = reader;
    let mut line = String::new();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut replies = 0usize;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = handle_line(trimmed, config);
        if let Reply::Error(err) = &reply {
            debug!(seq = ?err.seq, code = ?err.code, message = %err.message, "rejected request");
        }

        buf.clear();
        serde_json::to_writer(&mut buf, &reply)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
        replies += 1;
    }

    Ok(replies)
}

/// Serve stdin/stdout until stdin closes
pub async fn run_stdio(config: ServerConfig) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let replies = serve_lines(stdin, stdout, &config).await?;
    info!(replies, "stdin closed");
    Ok(())
}

/// Start the TCP server
///
/// `ready_tx` receives the bound address once listening (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!(%bound, "probe server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let config = Arc::new(config);
    let mut client_id_counter = 0usize;

    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!(error = %e, "accept failed");
                continue;
            }
        };
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            match handle_client(socket, &config).await {
                Ok(replies) => info!(client_id, replies, "client disconnected"),
                Err(e) => warn!(client_id, error = %e, "client error"),
            }
        });
    }
}

/// Handle a single client connection
async fn handle_client(socket: TcpStream, config: &ServerConfig) -> anyhow::Result<usize> {
    let (reader, writer) = socket.into_split();
    serve_lines(BufReader::new(reader), writer, config).await
}
