//! Embedded console capture.
//!
//! # Responsibilities
//! - Read the child's stdout/stderr line by line
//! - Push lines into the bounded channel the console sink consumes
//!
//! # Design Decisions
//! - Two independent reader tasks, one per stream
//! - Bounded channel: a slow sink applies backpressure to the readers
//!   instead of buffering without limit
//! - Readers stop on stream EOF, on sink drop, or on the shutdown signal

use crate::lifecycle::shutdown::ShutdownSignal;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Which stream a captured line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// One captured line of server output.
#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub stream: ConsoleStream,
    pub line: String,
}

/// Attach line readers to a child spawned with piped stdout/stderr.
///
/// Returns the reader task handles; both tasks end when their stream closes
/// or `shutdown` triggers.
pub fn spawn_readers(
    child: &mut Child,
    tx: mpsc::Sender<ConsoleLine>,
    shutdown: &ShutdownSignal,
) -> Vec<JoinHandle<()>> {
    let mut readers = Vec::new();

    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(
            stdout,
            ConsoleStream::Stdout,
            tx.clone(),
            shutdown.subscribe(),
        ));
    }

    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_reader(
            stderr,
            ConsoleStream::Stderr,
            tx,
            shutdown.subscribe(),
        ));
    }

    readers
}

fn spawn_reader<R>(
    stream: R,
    kind: ConsoleStream,
    tx: mpsc::Sender<ConsoleLine>,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        loop {
            tokio::select! {
                next = lines.next_line() => {
                    match next {
                        Ok(Some(line)) => {
                            if tx.send(ConsoleLine { stream: kind, line }).await.is_err() {
                                // Sink dropped; nothing left to feed
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            tracing::debug!(stream = ?kind, error = %e, "Console reader stopped");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!(stream = ?kind, "Console reader cancelled");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reader_forwards_lines_until_eof() {
        let (tx, mut rx) = mpsc::channel(16);
        let shutdown = ShutdownSignal::new();
        let data: &[u8] = b"first line\nsecond line\n";
        let handle = spawn_reader(data, ConsoleStream::Stdout, tx, shutdown.subscribe());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.line, "first line");
        assert_eq!(first.stream, ConsoleStream::Stdout);
        assert_eq!(rx.recv().await.unwrap().line, "second line");

        // EOF ends the task and closes the channel
        handle.await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_reader() {
        let (tx, _rx) = mpsc::channel(16);
        let shutdown = ShutdownSignal::new();
        // A stream that never ends: duplex with the write half kept open
        let (_writer, reader) = tokio::io::duplex(64);
        let handle = spawn_reader(reader, ConsoleStream::Stderr, tx, shutdown.subscribe());

        shutdown.trigger();
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("reader should stop on shutdown")
            .unwrap();
    }
}
