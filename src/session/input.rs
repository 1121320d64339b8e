use std::io::{self, BufRead, BufReader, Read};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tracing::debug;

/// Where the session loop gets its input lines from
#[allow(async_fn_in_trait)]
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: AsyncBufRead + Unpin> LineSource for Lines<R> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

/// Lines read by a dedicated OS thread and handed over through a channel.
///
/// Dropping it never waits on the reader: a thread parked in a blocking
/// read is simply abandoned, so the runtime can shut down while the
/// terminal is still open.
pub struct ChannelLines {
    rx: mpsc::Receiver<io::Result<String>>,
}

impl ChannelLines {
    /// Start a reader thread over `reader`
    pub fn spawn<R: Read + Send + 'static>(reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel(16);

        std::thread::Builder::new()
            .name("input-reader".to_string())
            .spawn(move || {
                for line in BufReader::new(reader).lines() {
                    let failed = line.is_err();
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
                debug!("Input reader finished");
            })?;

        Ok(Self { rx })
    }
}

impl LineSource for ChannelLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.rx.recv().await.transpose()
    }
}

/// The process's standard input as a [`LineSource`]
pub fn stdin_lines() -> io::Result<ChannelLines> {
    ChannelLines::spawn(io::stdin())
}
