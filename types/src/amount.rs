//! Token amounts.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole token is `10^18` raw.

/// Decimal places of the token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Raw units in one whole token.
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Convert a whole-token count to raw units, `None` on overflow.
pub fn whole_tokens(tokens: u128) -> Option<u128> {
    tokens.checked_mul(TOKEN_UNIT)
}

/// Render a raw amount as a decimal token string, trimming trailing zeros.
///
/// `47_500_000_000_000_000_000` renders as `"47.5"`, `0` as `"0"`.
pub fn format_amount(raw: u128) -> String {
    let whole = raw / TOKEN_UNIT;
    let frac = raw % TOKEN_UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Parse a decimal token string (`"47.5"`, `"1000"`) into raw units.
///
/// Returns `None` for malformed input, more than 18 fractional digits, or
/// values that overflow u128.
pub fn parse_amount(s: &str) -> Option<u128> {
    let s = s.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > TOKEN_DECIMALS as usize {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole_raw = if whole.is_empty() {
        0
    } else {
        whole_tokens(whole.parse::<u128>().ok()?)?
    };
    let frac_raw = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = TOKEN_DECIMALS as usize);
        padded.parse::<u128>().ok()?
    };
    whole_raw.checked_add(frac_raw)
}
