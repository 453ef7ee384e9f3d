//! Line unfolding.
//!
//! A logical content line may be split over several physical lines; every
//! continuation line starts with a single space. [`Unfolder`] joins them back
//! together and keeps a [`RawCapture`] of the physical lines it consumed.

use std::io::{self, BufRead};

/// Physical lines captured for diagnostics.
///
/// Lines are stored exactly as read, terminators included.
#[derive(Debug, Default, Clone)]
pub struct RawCapture {
    lines: Vec<String>,
    logical_start: usize,
}

impl RawCapture {
    /// The captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drops everything captured before the current logical line.
    pub fn restart(&mut self) {
        self.lines.drain(..self.logical_start);
        self.logical_start = 0;
    }

    /// Returns an owned copy of the captured lines.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Drops every captured line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.logical_start = 0;
    }

    fn begin_logical_line(&mut self) {
        self.logical_start = self.lines.len();
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

/// Turns a buffered byte stream into unfolded logical lines.
pub struct Unfolder<R> {
    reader: R,
    capture: RawCapture,
    buf: Vec<u8>,
    /// Read failure hit while looking ahead, returned on the next call.
    deferred: Option<io::Error>,
}

impl<R: BufRead> Unfolder<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            capture: RawCapture::default(),
            buf: Vec::new(),
            deferred: None,
        }
    }

    /// Reads the next logical line, or `None` at end of stream.
    ///
    /// Each physical line is trimmed of its terminator and surrounding
    /// whitespace before being joined. Invalid UTF-8 is replaced lossily.
    ///
    /// A failure while peeking past a complete line does not lose that
    /// line: it is returned first and the error comes from the next call.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        self.capture.begin_logical_line();

        let mut logical = String::new();
        let mut consumed = false;
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                break;
            }
            consumed = true;

            let physical = String::from_utf8_lossy(&self.buf).into_owned();
            logical.push_str(physical.trim());
            self.capture.push(physical);

            match self.next_is_continuation() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    self.deferred = Some(err);
                    break;
                }
            }
        }

        Ok(consumed.then_some(logical))
    }

    /// The physical lines captured so far.
    pub fn capture(&self) -> &RawCapture {
        &self.capture
    }

    /// Mutable access to the capture, for the assembler.
    pub fn capture_mut(&mut self) -> &mut RawCapture {
        &mut self.capture
    }

    fn next_is_continuation(&mut self) -> io::Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first() == Some(&b' ')),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
