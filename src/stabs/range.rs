use super::constants::{LONG_LONG_HIGH, LONG_LONG_LOW, UNSIGNED_LONG_LONG_HIGH};
use super::parsers::decode_int;
use super::types::DebugType;

fn base(name: &str, size: usize, signed: bool) -> DebugType {
    DebugType::Base {
        name: name.to_string(),
        size,
        signed,
    }
}

/// Maps the bounds of a `r` range onto a base type.
///
/// `self_referential` is set when the range is defined in terms of its own
/// type number, as gcc does for `char` and the unsigned short types. The
/// rules are tried in order; `None` means no rule matched.
pub fn range_base_type(
    name: &str,
    lower_text: &str,
    upper_text: &str,
    self_referential: bool,
) -> Option<DebugType> {
    let lower = decode_int(lower_text);
    let upper = decode_int(upper_text);

    // Bounds that do not fit in 64 bits are the octal long long sentinels
    let (Some(lower), Some(upper)) = (lower, upper) else {
        if lower_text == LONG_LONG_LOW && upper_text == LONG_LONG_HIGH {
            return Some(base(name, 8, true));
        }
        if lower == Some(0) && upper_text == UNSIGNED_LONG_LONG_HIGH {
            return Some(base(name, 8, false));
        }
        return None;
    };

    let ty = match (lower, upper) {
        (0, -1) => match name {
            "long long int" => base(name, 8, true),
            "long long unsigned int" => base(name, 8, false),
            _ => base(name, 4, false),
        },
        // floating point, the lower bound is the width in bytes
        (lower, 0) if lower > 0 => base(name, lower as usize, true),
        (-128, 127) => base(name, 1, true),
        (0, 127) if self_referential => base(name, 1, true),
        (0, 255) if self_referential => base(name, 1, false),
        (-32768, 32767) => base(name, 2, true),
        (0, 65535) if self_referential => base(name, 2, false),
        (-2147483648, 2147483647) => base(name, 4, true),
        _ => return None,
    };
    Some(ty)
}
