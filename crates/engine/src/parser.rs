//! Single-line record parsing.
//!
//! A record is `<key>;<value>`. The first `;` is authoritative: everything
//! before it is the key (verbatim, possibly empty) and everything after it is
//! handed to the numeric parser.

use rust_decimal::Decimal;

use crate::error::RecordError;

pub const DELIMITER: u8 = b';';

/// One parsed record, borrowing its key from the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub key: &'a [u8],
    pub value: Decimal,
}

/// Parse one line (without its `\n`).
///
/// Returns `Ok(None)` for empty or whitespace-only lines, which are skipped
/// silently rather than reported.
///
/// # Errors
///
/// [`RecordError::MalformedRecord`] if the line has no delimiter,
/// [`RecordError::InvalidValue`] if the value is not a decimal number.
pub fn parse(line: &[u8]) -> Result<Option<Record<'_>>, RecordError> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let Some(idx) = memchr::memchr(DELIMITER, line) else {
        return Err(RecordError::MalformedRecord);
    };

    let key = &line[..idx];
    let value = parse_value(&line[idx + 1..])?;
    Ok(Some(Record { key, value }))
}

/// Parse a decimal value exactly.
///
/// Surrounding ASCII whitespace is ignored (this also absorbs the `\r` of a
/// CRLF line ending). The accepted grammar is
/// `[+-]? digits [. digits] [(e|E) [+-]? digits]`; anything else, including
/// `nan`, `inf`, digit separators and values outside the decimal range, is
/// rejected.
///
/// # Errors
///
/// [`RecordError::InvalidValue`] carrying the raw text.
pub fn parse_value(raw: &[u8]) -> Result<Decimal, RecordError> {
    let trimmed = raw.trim_ascii();
    let Some(has_exponent) = scan_number(trimmed) else {
        return Err(RecordError::invalid_value(raw));
    };
    let text = std::str::from_utf8(trimmed).map_err(|_| RecordError::invalid_value(raw))?;

    let parsed = if has_exponent {
        Decimal::from_scientific(text)
    } else {
        text.parse::<Decimal>()
    };
    parsed.map_err(|_| RecordError::invalid_value(raw))
}

/// Check `bytes` against the value grammar. Returns whether an exponent part
/// is present, or `None` if the text is not a number.
fn scan_number(bytes: &[u8]) -> Option<bool> {
    fn digits(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }
    fn sign(bytes: &[u8], i: usize) -> usize {
        match bytes.get(i) {
            Some(b'+' | b'-') => i + 1,
            _ => i,
        }
    }

    let start = sign(bytes, 0);
    let mut i = digits(bytes, start);
    if i == start {
        return None;
    }

    if bytes.get(i) == Some(&b'.') {
        let frac = i + 1;
        i = digits(bytes, frac);
        if i == frac {
            return None;
        }
    }

    let mut has_exponent = false;
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let exp = sign(bytes, i + 1);
        i = digits(bytes, exp);
        if i == exp {
            return None;
        }
        has_exponent = true;
    }

    (i == bytes.len()).then_some(has_exponent)
}
