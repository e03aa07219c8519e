use crate::models::Quantity;

/// Unparsed text of one upstream feed, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    quantity: Quantity,
    text: String,
}

/// A line borrowed from a [`RawSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line content without its `\n` / `\r\n` terminator.
    pub text: &'a str,
    /// Bytes consumed from the buffer, terminator included.
    pub consumed: usize,
}

impl RawSource {
    pub fn new(quantity: Quantity, text: impl Into<String>) -> Self {
        Self {
            quantity,
            text: text.into(),
        }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte length of the buffer.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `offset` is the first byte of a line.
    pub fn starts_line_at(&self, offset: usize) -> bool {
        offset == 0 || self.text.as_bytes().get(offset - 1) == Some(&b'\n')
    }

    /// The line starting at `offset`, or `None` when the offset is at or past
    /// the end of the buffer (or not on a character boundary).
    pub fn line_at(&self, offset: usize) -> Option<SourceLine<'_>> {
        let rest = self.text.get(offset..)?;
        if rest.is_empty() {
            return None;
        }

        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };

        Some(SourceLine {
            text: line.strip_suffix('\r').unwrap_or(line),
            consumed,
        })
    }
}
