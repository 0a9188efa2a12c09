/*
  Constants for STABS records
*/

use num_enum::TryFromPrimitive;

//////////////////////////////// Variables ////////////////////////////////

/// Size of one record when the value field is 32 bits wide
pub const RECORD_SIZE_32: usize = 12;

/// Size of one record when the value field is 64 bits wide
pub const RECORD_SIZE_64: usize = 16;

// Range bounds gcc prints in octal for the 64-bit integer types
pub const LONG_LONG_LOW: &str = "01000000000000000000000";
pub const LONG_LONG_HIGH: &str = "0777777777777777777777";
pub const UNSIGNED_LONG_LONG_HIGH: &str = "01777777777777777777777";

//////////////////////////////// Enums ////////////////////////////////

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Endianness {
    Big,
    #[default]
    Little,
}

/// Width of the `value` field of a record
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum RecordWidth {
    #[default]
    Bits32,
    Bits64,
}

impl RecordWidth {
    pub const fn record_size(self) -> usize {
        match self {
            RecordWidth::Bits32 => RECORD_SIZE_32,
            RecordWidth::Bits64 => RECORD_SIZE_64,
        }
    }

    /// Reinterprets a sign-extended record value as an address
    pub const fn address(self, value: i64) -> u64 {
        match self {
            RecordWidth::Bits32 => value as u32 as u64,
            RecordWidth::Bits64 => value as u64,
        }
    }
}

/// Record type codes (the `n_type` byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[allow(non_camel_case_types)]
#[rustfmt::skip]
#[repr(u8)]
pub enum StabType {
    N_GSYM   = 0x20, N_FNAME  = 0x22, N_FUN    = 0x24, N_STSYM  = 0x26,
    N_LCSYM  = 0x28, N_MAIN   = 0x2a, N_ROSYM  = 0x2c, N_PC     = 0x30,
    N_NSYMS  = 0x32, N_NOMAP  = 0x34, N_OBJ    = 0x38, N_OPT    = 0x3c,
    N_RSYM   = 0x40, N_M2C    = 0x42, N_SLINE  = 0x44, N_DSLINE = 0x46,
    N_BSLINE = 0x48, N_DEFD   = 0x4a, N_FLINE  = 0x4c, N_EHDECL = 0x50,
    N_CATCH  = 0x54, N_SSYM   = 0x60, N_ENDM   = 0x62, N_SO     = 0x64,
    N_LSYM   = 0x80, N_BINCL  = 0x82, N_SOL    = 0x84, N_PSYM   = 0xa0,
    N_EINCL  = 0xa2, N_ENTRY  = 0xa4, N_LBRAC  = 0xc0, N_EXCL   = 0xc2,
    N_SCOPE  = 0xc4, N_RBRAC  = 0xe0, N_BCOMM  = 0xe2, N_ECOMM  = 0xe4,
    N_ECOML  = 0xe8, N_WITH   = 0xea, N_NBTEXT = 0xf0, N_NBDATA = 0xf2,
    N_NBBSS  = 0xf4, N_NBSTS  = 0xf6, N_NBLCS  = 0xf8, N_LENG   = 0xfe,
}

impl StabType {
    /// Codes whose string carries a `name:descriptor type` field
    pub const fn carries_symbol(self) -> bool {
        matches!(
            self,
            StabType::N_GSYM
                | StabType::N_LSYM
                | StabType::N_PSYM
                | StabType::N_STSYM
                | StabType::N_LCSYM
                | StabType::N_ROSYM
                | StabType::N_RSYM
                | StabType::N_CATCH
        )
    }
}

/// How a parameter reaches the callee
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParameterKind {
    Stack,
    Register,
    Reference,
    RegisterReference,
}

/// Storage class of a variable
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VariableKind {
    Global,
    Static,
    LocalStatic,
    Local,
    Register,
}
