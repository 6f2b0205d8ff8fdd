//! Newline-terminated, ASCII-neutralised text buffer.
//!
//! Only 7-bit ASCII characters carry structure (brackets, quotes,
//! backslash, hash, newline), so every byte outside that range is replaced
//! by [`PLACEHOLDER`] during construction. The replacement is byte-for-byte,
//! which keeps every offset into the buffer valid for the caller's original
//! `&str`.
//!
//! The scanner relies on a trailing `\n` sentinel: comments are consumed up
//! to the next newline and a backslash is always followed by something. The
//! buffer appends one when the text does not already end with a newline.

/// Ordinary character substituted for every non-ASCII byte.
pub const PLACEHOLDER: u8 = b'x';

/// Immutable, newline-terminated scan buffer.
///
/// # Layout
///
/// ```text
/// [neutralised source bytes..., b'\n' (appended when missing)]
/// ```
///
/// An empty source stays empty; there is nothing to terminate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    bytes: Vec<u8>,
    /// Whether the sentinel newline was appended rather than present in the source.
    appended_sentinel: bool,
}

impl SourceBuffer {
    /// Create a buffer from source text.
    ///
    /// Copies the text, replacing bytes `>= 127` with [`PLACEHOLDER`], and
    /// appends a `\n` sentinel if the text is non-empty and lacks one.
    pub fn new(source: &str) -> Self {
        let mut bytes: Vec<u8> = Vec::with_capacity(source.len() + 1);
        bytes.extend(source.bytes().map(neutralize));

        let appended_sentinel = !bytes.is_empty() && bytes.last() != Some(&b'\n');
        if appended_sentinel {
            bytes.push(b'\n');
        }

        Self {
            bytes,
            appended_sentinel,
        }
    }

    /// Returns the scan bytes, including the sentinel newline.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the scan bytes, including the sentinel newline.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if the trailing newline was added by the buffer.
    pub fn appended_sentinel(&self) -> bool {
        self.appended_sentinel
    }

    /// Discard everything before `lo`.
    ///
    /// The caller guarantees `lo` is the start of a line.
    pub(crate) fn drop_front(&mut self, lo: usize) {
        self.bytes.drain(..lo);
    }
}

/// Map a source byte to its scan byte.
///
/// ASCII below DEL passes through; everything else becomes [`PLACEHOLDER`].
#[inline]
pub const fn neutralize(byte: u8) -> u8 {
    if byte < 127 {
        byte
    } else {
        PLACEHOLDER
    }
}

#[cfg(test)]
mod tests;
