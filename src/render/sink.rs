//! Output sinks for rendered markup.

use crate::error::Result;
use std::io::Write;

/// Append-only destination for RTF markup.
pub trait Sink {
    /// Append markup to the sink.
    fn write(&mut self, markup: &str) -> Result<()>;
}

impl Sink for String {
    fn write(&mut self, markup: &str) -> Result<()> {
        self.push_str(markup);
        Ok(())
    }
}

/// Sink over any [`std::io::Write`], e.g. a file or socket.
///
/// # Example
///
/// ```no_run
/// use rtfcraft::render::StreamSink;
/// use std::fs::File;
///
/// let file = File::create("report.rtf")?;
/// let mut sink = StreamSink::new(std::io::BufWriter::new(file));
/// # Ok::<(), rtfcraft::Error>(())
/// ```
pub struct StreamSink<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> StreamSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write(&mut self, markup: &str) -> Result<()> {
        self.inner.write_all(markup.as_bytes())?;
        self.bytes_written += markup.len() as u64;
        Ok(())
    }
}
