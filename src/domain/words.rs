//! Rupee amounts in English words, grouped the Indian way.
//!
//! Groups run crore (10^7), lakh (10^5), thousand (10^3), then the final
//! 0..999 group. `1234567.89` reads "Twelve Lakh Thirty Four Thousand Five
//! Hundred Sixty Seven Rupees and Eighty Nine Paise".

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::DomainError;

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

const UNITS: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Render a non-negative amount as "<rupees> Rupees[ and <paise> Paise]".
///
/// Rupees are the truncated integer part; paise are the fraction rounded
/// half-up to a whole paisa. A fraction that rounds to 100 paise carries
/// into the rupees, so `100.999` reads "One Hundred One Rupees".
///
/// Word forms are not singularised: `1` reads "One Rupees".
pub fn amount_in_words(amount: Decimal) -> Result<String, DomainError> {
    let (rupees, paise) = split_rupees_paise(amount)?;

    let rupee_words = if rupees == 0 {
        "Zero".to_string()
    } else {
        indian_words(rupees)
    };

    if paise > 0 {
        Ok(format!(
            "{} Rupees and {} Paise",
            rupee_words,
            two_digit_words(paise)
        ))
    } else {
        Ok(format!("{} Rupees", rupee_words))
    }
}

/// Split into whole rupees and paise (0..=99), carrying a rounded-up 100.
fn split_rupees_paise(amount: Decimal) -> Result<(u128, u8), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::NegativeAmount(amount));
    }

    let whole = amount.trunc();
    let fraction = (amount - whole) * Decimal::ONE_HUNDRED;
    let paise = fraction.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let rupees = whole.to_u128().ok_or(DomainError::OutOfRange(amount))?;
    let paise = paise.to_u8().ok_or(DomainError::OutOfRange(amount))?;

    if paise == 100 {
        Ok((rupees + 1, 0))
    } else {
        Ok((rupees, paise))
    }
}

/// Words for a positive whole number using crore/lakh/thousand grouping.
/// The crore count is itself rendered this way when it exceeds 99.
fn indian_words(n: u128) -> String {
    let crore = n / CRORE;
    let lakh = (n % CRORE) / LAKH;
    let thousand = (n % LAKH) / THOUSAND;
    let rest = n % THOUSAND;

    let mut parts = Vec::new();
    if crore > 0 {
        parts.push(format!("{} Crore", indian_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digit_words(lakh as u8)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digit_words(thousand as u8)));
    }
    if rest > 0 {
        parts.push(three_digit_words(rest as u16));
    }
    parts.join(" ")
}

/// 1..=999
fn three_digit_words(n: u16) -> String {
    let hundreds = (n / 100) as u8;
    let rest = (n % 100) as u8;

    match (hundreds, rest) {
        (0, _) => two_digit_words(rest),
        (_, 0) => format!("{} Hundred", UNITS[hundreds as usize]),
        _ => format!(
            "{} Hundred {}",
            UNITS[hundreds as usize],
            two_digit_words(rest)
        ),
    }
}

/// 1..=99
fn two_digit_words(n: u8) -> String {
    let n = n as usize;
    if n < 20 {
        return UNITS[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        units => format!("{} {}", TENS[n / 10], UNITS[units]),
    }
}
