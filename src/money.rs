//! Money parsing and conversion between major units and minor units.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use thiserror::Error;

/// Errors raised while parsing or converting prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount is not a decimal number or does not fit in minor units.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not supported.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code, ignoring case.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than GBP, USD, EUR and INR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "INR" => Ok(INR),
        _ => Err(PriceError::UnknownCurrency(code.to_string())),
    }
}

/// Convert an amount in major units (e.g. `10.50`) into money, rounding to the nearest minor unit.
///
/// # Errors
///
/// Returns [`PriceError::InvalidPrice`] if the amount does not fit in minor units.
pub fn from_major_units(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::InvalidPrice(amount.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Express money as a decimal amount in major units.
pub fn to_major_units(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Parse a bare amount (e.g. `"10.00"`) in the given currency.
///
/// # Errors
///
/// Returns [`PriceError::InvalidPrice`] if the amount is not a decimal number.
pub fn parse_amount(
    s: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?;

    from_major_units(amount, currency)
}

/// Parse price string (e.g., "10.00 INR") into money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    parse_amount(amount, currency_from_code(code)?)
}
