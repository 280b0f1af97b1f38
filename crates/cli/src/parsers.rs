use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .trim()
        .replace('_', "")
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

/// Parse a thread count constrained to the inclusive range [1, 1024].
///
/// # Errors
/// Returns an error if the input string is not a valid number or is outside the range.
pub fn parse_thread_count(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, Some(1024))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_positive_usize_basic() {
        assert_eq!(parse_positive_usize("8"), Ok(8));
        assert_eq!(parse_positive_usize(" 1_024 "), Ok(1024));
    }

    #[test]
    fn test_positive_usize_rejects_zero_and_garbage() {
        assert!(parse_positive_usize("0").is_err());
        assert!(parse_positive_usize("-3").is_err());
        assert!(parse_positive_usize("many").is_err());
    }

    #[test]
    fn test_thread_count_upper_bound() {
        assert_eq!(parse_thread_count("1024"), Ok(1024));
        let err = parse_thread_count("1025").unwrap_err();
        assert!(err.contains("at most 1024"));
    }

    proptest! {
        #[test]
        fn test_positive_usize_roundtrip(n in 1usize..1_000_000) {
            prop_assert_eq!(parse_positive_usize(&n.to_string()), Ok(n));
        }
    }
}
