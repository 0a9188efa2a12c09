use std::borrow::Cow;

/// The `.stabstr` blob: NUL-terminated strings addressed by byte offset
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    data: &'a [u8],
}

impl<'a> StringTable<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Returns the string starting at `offset`.
    ///
    /// Offset 0 means "no string". An offset past the end yields an empty
    /// string and a missing terminator ends the string at the blob's end.
    pub fn get(&self, offset: u32) -> Cow<'a, str> {
        let start = offset as usize;
        if offset == 0 || start >= self.data.len() {
            return Cow::Borrowed("");
        }
        let bytes = &self.data[start..];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end])
    }
}

/// Trailing characters that continue a symbol string into the next record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationMarkers {
    pub backslash: bool,
    /// `?`, used by some AIX compilers
    pub question_mark: bool,
}

impl Default for ContinuationMarkers {
    fn default() -> Self {
        Self {
            backslash: true,
            question_mark: true,
        }
    }
}

impl ContinuationMarkers {
    fn strip<'s>(&self, text: &'s str) -> Option<&'s str> {
        if self.backslash {
            if let Some(stripped) = text.strip_suffix('\\') {
                return Some(stripped);
            }
        }
        if self.question_mark {
            if let Some(stripped) = text.strip_suffix('?') {
                return Some(stripped);
            }
        }
        None
    }
}

/// Joins continued fragments into one logical symbol string
#[derive(Debug, Default)]
pub struct Continuation {
    pending: Option<String>,
}

impl Continuation {
    /// Feeds one record's string.
    ///
    /// Returns `None` while the string is continued and the joined string
    /// once a fragment without a marker arrives.
    pub fn feed(&mut self, fragment: &str, markers: ContinuationMarkers) -> Option<String> {
        if let Some(stripped) = markers.strip(fragment) {
            self.pending.get_or_insert_with(String::new).push_str(stripped);
            return None;
        }
        match self.pending.take() {
            Some(mut joined) => {
                joined.push_str(fragment);
                Some(joined)
            }
            None => Some(fragment.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
