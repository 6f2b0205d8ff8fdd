//! Byte classification for structural scanning.
//!
//! Every byte maps to one of eight classes. Only brackets, quotes,
//! backslash, hash and newline matter for nesting, so everything else
//! collapses into [`CharClass::Ordinary`]. The mapping is a 256-entry
//! table built at compile time; bytes outside 7-bit ASCII are ordinary.

/// Structural class of a single byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharClass {
    /// Anything without structural meaning.
    Ordinary,
    /// `(`, `[` or `{`.
    OpenBracket,
    /// `)`, `]` or `}`.
    CloseBracket,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// `\`
    Backslash,
    /// `\n`
    Newline,
    /// `#`
    Hash,
}

impl CharClass {
    /// Returns `true` for either quote class.
    #[inline]
    pub const fn is_quote(self) -> bool {
        matches!(self, CharClass::SingleQuote | CharClass::DoubleQuote)
    }

    /// Returns `true` for classes that interrupt a run of ordinary text
    /// inside a statement (everything except ordinary bytes and newlines).
    #[inline]
    pub const fn is_special(self) -> bool {
        !matches!(self, CharClass::Ordinary | CharClass::Newline)
    }

    /// Canonical byte for this class, as used in compressed dumps.
    pub const fn marker(self) -> u8 {
        match self {
            CharClass::Ordinary => b'x',
            CharClass::OpenBracket => b'(',
            CharClass::CloseBracket => b')',
            CharClass::SingleQuote => b'\'',
            CharClass::DoubleQuote => b'"',
            CharClass::Backslash => b'\\',
            CharClass::Newline => b'\n',
            CharClass::Hash => b'#',
        }
    }
}

const CLASS_TABLE: [CharClass; 256] = {
    let mut table = [CharClass::Ordinary; 256];
    table[b'(' as usize] = CharClass::OpenBracket;
    table[b'[' as usize] = CharClass::OpenBracket;
    table[b'{' as usize] = CharClass::OpenBracket;
    table[b')' as usize] = CharClass::CloseBracket;
    table[b']' as usize] = CharClass::CloseBracket;
    table[b'}' as usize] = CharClass::CloseBracket;
    table[b'\'' as usize] = CharClass::SingleQuote;
    table[b'"' as usize] = CharClass::DoubleQuote;
    table[b'\\' as usize] = CharClass::Backslash;
    table[b'\n' as usize] = CharClass::Newline;
    table[b'#' as usize] = CharClass::Hash;
    table
};

/// Classify a single byte.
#[inline]
pub const fn class_of(byte: u8) -> CharClass {
    CLASS_TABLE[byte as usize]
}

/// A buffer with every byte replaced by its [`CharClass`].
///
/// Always the same length as the bytes it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedStream {
    classes: Vec<CharClass>,
}

impl ClassifiedStream {
    /// Number of classified bytes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class at `pos`, or `None` past the end.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<CharClass> {
        self.classes.get(pos).copied()
    }

    /// All classes in order.
    pub fn as_slice(&self) -> &[CharClass] {
        &self.classes
    }

    /// Render the stream with one marker byte per class, runs of ordinary
    /// text kept at full length.
    pub fn to_markers(&self) -> Vec<u8> {
        self.classes.iter().map(|class| class.marker()).collect()
    }
}

/// Classify every byte of `bytes`.
pub fn classify(bytes: &[u8]) -> ClassifiedStream {
    ClassifiedStream {
        classes: bytes.iter().map(|&b| class_of(b)).collect(),
    }
}

#[cfg(test)]
mod tests;
