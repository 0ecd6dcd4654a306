//! Digit grouping for already-rounded number strings.

/// Separator conventions for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub thousands: char,
    pub decimal: char,
}

impl Separators {
    /// `1,234.56`
    pub const EN: Separators = Separators {
        thousands: ',',
        decimal: '.',
    };

    /// `1.234,56`
    pub const PT_BR: Separators = Separators {
        thousands: '.',
        decimal: ',',
    };
}

/// Drop trailing fractional zeros and a dangling point: `"1.500"` → `"1.5"`.
pub fn trim_trailing_zeros(formatted: &str) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted.to_string()
    }
}

/// Group the integer part of a `.`-delimited number string.
///
/// The input must use `.` as its decimal point (as `Decimal::to_string` does);
/// the output uses the separators given.
pub fn group_digits(formatted: &str, sep: Separators) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };

    let mut parts = unsigned.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(sep.thousands);
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{}{}{}{}", sign, grouped, sep.decimal, frac),
        None => format!("{}{}", sign, grouped),
    }
}
