use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Quantity field: up to 3 integer digits, 2 decimal places.
pub const QUANTITY_DIGITS: (usize, usize) = (3, 2);

/// Price field: up to 8 integer digits, 2 decimal places.
pub const PRICE_DIGITS: (usize, usize) = (8, 2);

/// Parse a quantity field. Blank input means "not given" (one unit).
/// Example: "" -> None, "2" -> Some(2), "1.25" -> Some(1.25)
pub fn parse_quantity(input: &str) -> Result<Option<Decimal>, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    parse_limited(input, QUANTITY_DIGITS).map(Some)
}

/// Parse a price field. Thousands separators are ignored.
/// Example: "1,250.50" -> 1250.50, "99" -> 99
pub fn parse_price(input: &str) -> Result<Decimal, ParseAmountError> {
    let input = input.trim().replace(',', "");
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    parse_limited(&input, PRICE_DIGITS)
}

/// Parse any decimal amount, sign included. Thousands separators are ignored.
pub fn parse_amount(input: &str) -> Result<Decimal, ParseAmountError> {
    let input = input.trim().replace(',', "");
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    Decimal::from_str(&input).map_err(|_| ParseAmountError::InvalidFormat)
}

/// Format an amount with two decimals and Indian digit grouping.
/// Example: 1234567.891 -> "12,34,567.89", -1500 -> "-1,500.00"
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (units, paise) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{}{}.{}", sign, group_indian(units), paise)
}

/// "1234567" -> "12,34,567": the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

fn parse_limited(
    input: &str,
    (max_integer, max_fraction): (usize, usize),
) -> Result<Decimal, ParseAmountError> {
    let (integer, fraction) = match input.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (input, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFormat);
    }
    if integer.len() > max_integer {
        return Err(ParseAmountError::TooManyDigits { max: max_integer });
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::InvalidFormat);
        }
        if fraction.len() > max_fraction {
            return Err(ParseAmountError::TooManyDecimals { max: max_fraction });
        }
    }

    Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    TooManyDigits { max: usize },
    TooManyDecimals { max: usize },
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid number format"),
            ParseAmountError::TooManyDigits { max } => {
                write!(f, "at most {} digits before the decimal point", max)
            }
            ParseAmountError::TooManyDecimals { max } => {
                write!(f, "at most {} decimal places", max)
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}
