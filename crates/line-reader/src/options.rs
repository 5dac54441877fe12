/// Initial capacity of the buffered reader.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Reader options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    /// Capacity of the buffer wrapping the file handle (at least 1).
    pub buffer_capacity: usize,
    /// Maximum length of a line in bytes, excluding the line terminator.
    ///
    /// Lines are unbounded when `None`.
    pub max_line_length: Option<usize>,
    /// Fail on lines that are not valid UTF-8.
    ///
    /// Invalid sequences are replaced with `U+FFFD` otherwise.
    pub strict_utf8: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_line_length: None,
            strict_utf8: false,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: impl Into<Option<usize>>) -> Self {
        self.max_line_length = max_line_length.into();
        self
    }

    #[must_use]
    pub fn with_strict_utf8(mut self, strict_utf8: bool) -> Self {
        self.strict_utf8 = strict_utf8;
        self
    }
}
