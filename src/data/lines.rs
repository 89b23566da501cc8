use std::io::{self, BufRead};

// ---------------------------------------------------------------------------
// RawLines – physical lines with their own terminators
// ---------------------------------------------------------------------------

/// Reads physical lines ending in `\n`, `\r\n` or a lone `\r`.
///
/// Each line is returned with its terminator (none on a final
/// unterminated line). Bytes that are not UTF-8 give `InvalidData`.
pub struct RawLines<R> {
    source: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(source: R) -> Self {
        RawLines {
            source,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<&str>> {
        if self.pos >= self.buf.len() {
            self.buf.clear();
            self.pos = 0;
            if self.source.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
        }
        // `buf` holds at most one `\n`, at its end; any `\r` inside it that
        // is not followed by that `\n` ends a line of its own.
        let len = line_len(&self.buf[self.pos..]);
        let line = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        std::str::from_utf8(line)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

fn line_len(rest: &[u8]) -> usize {
    rest.iter()
        .enumerate()
        .position(|(i, &b)| b == b'\n' || (b == b'\r' && rest.get(i + 1) != Some(&b'\n')))
        .map_or(rest.len(), |i| i + 1)
}

/// Consume one physical line from `source`, terminator included.
pub fn skip_line<R: BufRead>(source: &mut R) -> io::Result<()> {
    loop {
        let buf = source.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(i) = buf.iter().position(|&b| b == b'\n' || b == b'\r') {
            let cr = buf[i] == b'\r';
            source.consume(i + 1);
            if cr && source.fill_buf()?.first() == Some(&b'\n') {
                source.consume(1);
            }
            return Ok(());
        }
        let n = buf.len();
        source.consume(n);
    }
}
