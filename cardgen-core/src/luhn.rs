//! Luhn (mod 10) checksum
//!
//! Digits are counted from the right. The check digit is held aside and every
//! other remaining digit, starting with the one next to it, is doubled; a
//! doubled value above 9 has 9 subtracted. A number is valid when the sum of
//! all transformed digits plus the check digit is a multiple of 10.

/// Parse an ASCII digit string into its digit values.
///
/// Returns `None` if any character is not `0`-`9`.
pub fn parse_digits(number: &str) -> Option<Vec<u8>> {
    number
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Returns true iff `number` is a digit string with a valid Luhn checksum.
///
/// Strings shorter than two digits carry no payload and are rejected.
pub fn is_valid(number: &str) -> bool {
    let Some(digits) = parse_digits(number) else {
        return false;
    };
    if digits.len() < 2 {
        return false;
    }

    let mut reversed = digits.into_iter().rev();
    let check = reversed.next().map(u32::from).unwrap_or_default();
    (weighted_sum(reversed) + check) % 10 == 0
}

/// Compute the check digit that makes `payload` followed by it Luhn-valid.
///
/// A placeholder `0` takes the check position, the payload is run through the
/// same weighted sum as [`is_valid`], and the digit is `(10 - sum % 10) % 10`.
pub fn check_digit(payload: &str) -> Option<u8> {
    let digits = parse_digits(payload)?;
    let placeholder = 0;
    let sum = weighted_sum(digits.into_iter().rev()) + placeholder;
    Some(((10 - sum % 10) % 10) as u8)
}

/// Sum of the digits to the left of the check position, given right to left.
fn weighted_sum(digits: impl Iterator<Item = u8>) -> u32 {
    digits
        .enumerate()
        .map(|(i, d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum()
}
