//! Test chat client.
//!
//! Speaks the line protocol over a real socket and asserts on what the
//! server sends back.

use chat_proto::PROMPT;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send raw bytes with no terminator added.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send one line, adding CRLF the way telnet does.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.send_raw(format!("{line}\r\n").as_bytes()).await
    }

    /// Receive one line with its terminator stripped.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(RECV_TIMEOUT).await
    }

    /// Receive one line with a custom timeout.
    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches('\n').to_string())
    }

    /// Receive one line and assert on it.
    pub async fn expect_line(&mut self, expected: &str) -> anyhow::Result<()> {
        let line = self.recv_line().await?;
        if line != expected {
            anyhow::bail!("expected {expected:?}, got {line:?}");
        }
        Ok(())
    }

    /// Read the unterminated login prompt.
    pub async fn expect_prompt(&mut self) -> anyhow::Result<()> {
        let mut buf = [0u8; PROMPT.len()];
        timeout(RECV_TIMEOUT, self.reader.read_exact(&mut buf))
            .await??;
        if buf != PROMPT.as_bytes() {
            anyhow::bail!("expected prompt, got {:?}", String::from_utf8_lossy(&buf));
        }
        Ok(())
    }

    /// Read the help banner through its trailing blank line.
    pub async fn expect_help(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    /// Answer the prompt with `name` and consume the welcome that follows.
    pub async fn login(&mut self, name: &str) -> anyhow::Result<()> {
        self.expect_prompt().await?;
        self.send_line(name).await?;
        self.expect_help().await?;
        self.expect_line(&format!("!! {name} has joined the chat"))
            .await
    }

    /// Assert that nothing arrives within `dur`.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        let mut line = String::new();
        match timeout(dur, self.reader.read_line(&mut line)).await {
            Err(_) => Ok(()),
            Ok(Ok(0)) => anyhow::bail!("connection closed"),
            Ok(_) => anyhow::bail!("unexpected line {line:?}"),
        }
    }

    /// Wait for the server to close the connection.
    #[allow(dead_code)]
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        let n = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line))
            .await??;
        if n != 0 {
            anyhow::bail!("expected close, got {line:?}");
        }
        Ok(())
    }
}
