use super::constants::{Endianness, RecordWidth};
use nom::{
    IResult, Parser,
    number::complete::{be_i16, be_i32, be_i64, be_u32, le_i16, le_i32, le_i64, le_u32, u8},
};

/// One fixed-width record of the `.stab` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord {
    pub string_offset: u32, // Offset of the record's string in the string blob
    pub type_code: u8,      // Record type (see `StabType`)
    pub other: u8,          // Unused by most producers
    pub desc: i16,          // Line number for SLINE, otherwise producer specific
    pub value: i64,         // Address or offset, sign-extended from 32 bits when narrow
}

/// Byte order and value width of a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordLayout {
    pub endianness: Endianness,
    pub width: RecordWidth,
}

impl RecordLayout {
    pub const fn new(endianness: Endianness, width: RecordWidth) -> Self {
        Self { endianness, width }
    }

    pub const fn record_size(&self) -> usize {
        self.width.record_size()
    }
}

/// Parses a 32-bit unsigned integer with specified endianness
pub fn parse_u32(input: &[u8], endianness: Endianness) -> IResult<&[u8], u32> {
    match endianness {
        Endianness::Big => be_u32.parse(input),
        Endianness::Little => le_u32.parse(input),
    }
}

/// Parses a 16-bit signed integer with specified endianness
pub fn parse_i16(input: &[u8], endianness: Endianness) -> IResult<&[u8], i16> {
    match endianness {
        Endianness::Big => be_i16.parse(input),
        Endianness::Little => le_i16.parse(input),
    }
}

/// Parses the value field, widening narrow values with sign extension
pub fn parse_value(input: &[u8], layout: RecordLayout) -> IResult<&[u8], i64> {
    match (layout.width, layout.endianness) {
        (RecordWidth::Bits32, Endianness::Big) => be_i32.map(i64::from).parse(input),
        (RecordWidth::Bits32, Endianness::Little) => le_i32.map(i64::from).parse(input),
        (RecordWidth::Bits64, Endianness::Big) => be_i64.parse(input),
        (RecordWidth::Bits64, Endianness::Little) => le_i64.parse(input),
    }
}

/// Parses a single record
pub fn parse_record(input: &[u8], layout: RecordLayout) -> IResult<&[u8], RawRecord> {
    let (input, string_offset) = parse_u32(input, layout.endianness)?;
    let (input, type_code) = u8(input)?;
    let (input, other) = u8(input)?;
    let (input, desc) = parse_i16(input, layout.endianness)?;
    let (input, value) = parse_value(input, layout)?;

    Ok((
        input,
        RawRecord {
            string_offset,
            type_code,
            other,
            desc,
            value,
        },
    ))
}

/// Lazy sequence of records over a record table.
///
/// A trailing partial record is never yielded. Cloning the iterator
/// restarts from the same position.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [u8],
    layout: RecordLayout,
}

impl<'a> Records<'a> {
    pub fn new(data: &'a [u8], layout: RecordLayout) -> Self {
        Self { data, layout }
    }
}

impl Iterator for Records<'_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        let size = self.layout.record_size();
        if self.data.len() < size {
            return None;
        }
        let (window, rest) = self.data.split_at(size);
        self.data = rest;
        parse_record(window, self.layout).ok().map(|(_, record)| record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.data.len() / self.layout.record_size();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Records<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &RawRecord, layout: RecordLayout) -> Vec<u8> {
        let mut out = Vec::new();
        match layout.endianness {
            Endianness::Little => {
                out.extend_from_slice(&record.string_offset.to_le_bytes());
                out.push(record.type_code);
                out.push(record.other);
                out.extend_from_slice(&record.desc.to_le_bytes());
                match layout.width {
                    RecordWidth::Bits32 => out.extend_from_slice(&(record.value as i32).to_le_bytes()),
                    RecordWidth::Bits64 => out.extend_from_slice(&record.value.to_le_bytes()),
                }
            }
            Endianness::Big => {
                out.extend_from_slice(&record.string_offset.to_be_bytes());
                out.push(record.type_code);
                out.push(record.other);
                out.extend_from_slice(&record.desc.to_be_bytes());
                match layout.width {
                    RecordWidth::Bits32 => out.extend_from_slice(&(record.value as i32).to_be_bytes()),
                    RecordWidth::Bits64 => out.extend_from_slice(&record.value.to_be_bytes()),
                }
            }
        }
        out
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            RawRecord { string_offset: 1, type_code: 0x64, other: 0, desc: 2, value: 0x1000 },
            RawRecord { string_offset: 8, type_code: 0x24, other: 0, desc: -3, value: -16 },
            RawRecord { string_offset: 0, type_code: 0x44, other: 7, desc: 42, value: 0x1010 },
        ]
    }

    #[test]
    fn little_endian_32_bit_table() {
        let layout = RecordLayout::new(Endianness::Little, RecordWidth::Bits32);
        let bytes: Vec<u8> = sample().iter().flat_map(|r| encode(r, layout)).collect();
        assert_eq!(bytes.len(), 36);
        let decoded: Vec<RawRecord> = Records::new(&bytes, layout).collect();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn big_endian_64_bit_table() {
        let layout = RecordLayout::new(Endianness::Big, RecordWidth::Bits64);
        let bytes: Vec<u8> = sample().iter().flat_map(|r| encode(r, layout)).collect();
        assert_eq!(bytes.len(), 48);
        let decoded: Vec<RawRecord> = Records::new(&bytes, layout).collect();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn field_offsets_in_narrow_big_endian_record() {
        let bytes = [0, 0, 0, 5, 0x44, 9, 0x01, 0x02, 0xff, 0xff, 0xff, 0xfe];
        let layout = RecordLayout::new(Endianness::Big, RecordWidth::Bits32);
        let (rest, record) = parse_record(&bytes, layout).unwrap();
        assert!(rest.is_empty());
        assert_eq!(record.string_offset, 5);
        assert_eq!(record.type_code, 0x44);
        assert_eq!(record.other, 9);
        assert_eq!(record.desc, 0x0102);
        assert_eq!(record.value, -2);
    }

    #[test]
    fn partial_trailing_record_is_dropped() {
        let layout = RecordLayout::default();
        let mut bytes: Vec<u8> = sample().iter().flat_map(|r| encode(r, layout)).collect();
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
        let records = Records::new(&bytes, layout);
        assert_eq!(records.len(), 3);
        assert_eq!(records.clone().count(), 3);
        // restartable: a clone starts over from the beginning
        assert_eq!(records.clone().next(), records.clone().next());
    }
}
