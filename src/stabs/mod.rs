pub mod constant;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod grammar;
pub mod parsers;
pub mod range;
pub mod record;
pub mod requestor;
pub mod strtab;
pub mod traversal;
pub mod typenum;
pub mod types;

pub use constants::{Endianness, ParameterKind, RecordWidth, StabType, VariableKind};
pub use diagnostics::{Diagnostics, Fallback, FallbackKind};
pub use error::{Error, Result};
pub use record::{RawRecord, RecordLayout, Records};
pub use requestor::Requestor;
pub use strtab::ContinuationMarkers;
pub use traversal::{Session, SymbolTraversal};
pub use typenum::TypeNumber;
pub use types::{DebugType, EnumField, Field, TypeId, TypeRef, TypeRegistry};

use log::debug;
use strtab::StringTable;

/// How to read a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StabsConfig {
    pub endianness: Endianness,
    pub width: RecordWidth,
    pub continuation: ContinuationMarkers,
    /// Reject a record table with a partial trailing record instead of
    /// ignoring the leftover bytes
    pub strict_alignment: bool,
}

impl StabsConfig {
    pub fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.endianness, self.width)
    }
}

impl RecordWidth {
    /// Width from a bit count as reported by an object-file loader
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(RecordWidth::Bits32),
            64 => Ok(RecordWidth::Bits64),
            other => Err(Error::UnsupportedWidth(other)),
        }
    }
}

/// The `.stab` and `.stabstr` sections of one object file
#[derive(Debug, Clone, Copy)]
pub struct Stabs<'a> {
    records: &'a [u8],
    strings: &'a [u8],
    config: StabsConfig,
}

impl<'a> Stabs<'a> {
    pub fn new(records: &'a [u8], strings: &'a [u8], config: StabsConfig) -> Result<Self> {
        let record_size = config.width.record_size();
        if config.strict_alignment && records.len() % record_size != 0 {
            return Err(Error::Misaligned {
                len: records.len(),
                record_size,
            });
        }
        Ok(Self {
            records,
            strings,
            config,
        })
    }

    pub fn config(&self) -> &StabsConfig {
        &self.config
    }

    pub fn records(&self) -> Records<'a> {
        Records::new(self.records, self.config.layout())
    }

    /// Decodes every record, reporting symbols to `requestor`
    pub fn parse<R: Requestor + ?Sized>(&self, requestor: &mut R) -> Session {
        debug!(
            "parsing {} records ({:?}, {:?})",
            self.records().len(),
            self.config.endianness,
            self.config.width
        );
        let traversal = SymbolTraversal::new(StringTable::new(self.strings), self.config, requestor);
        traversal.run(self.records())
    }
}
