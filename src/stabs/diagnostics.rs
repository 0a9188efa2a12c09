//! Record of every place the decoder substituted a placeholder.
//!
//! STABS readers are lenient: a numeral that does not parse becomes 0, a
//! type expression that stops early yields whatever was built so far, and
//! an unsupported descriptor becomes an unknown type. Each of those paths
//! appends a [`Fallback`] here so callers (and tests) can tell a real 0
//! from a substituted one.

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// A numeral that did not parse, replaced by 0
    Numeral,
    /// A type that could not be resolved, replaced by an unknown type
    UnknownType,
    /// A sub-expression that ended before its closing delimiter
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub kind: FallbackKind,
    pub context: &'static str, // Grammar rule that gave up
    pub text: String,          // Offending input, possibly empty
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Fallback>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: FallbackKind, context: &'static str, text: impl Into<String>) {
        let text = text.into();
        trace!("fallback {:?} in {}: {:?}", kind, context, text);
        self.entries.push(Fallback { kind, context, text });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fallback> {
        self.entries.iter()
    }

    pub fn count(&self, kind: FallbackKind) -> usize {
        self.entries.iter().filter(|f| f.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
