//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::CartLine;

/// Errors that can occur while calculating line and cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total, or the running total after adding that line, does not fit in minor units.
    #[error("total overflows at {0}")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `unit_price × quantity` for a single line.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total(line: &CartLine) -> Result<Money<'static, Currency>, PricingError> {
    let price = line.unit_price();

    let minor_units = price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or_else(|| PricingError::Overflow(line.name().to_string()))?;

    Ok(Money::from_minor(minor_units, price.currency()))
}

/// Calculates the total price of a list of lines in the given currency.
///
/// An empty list totals zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the running total does not fit in minor units.
/// - [`PricingError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price(
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            let line_total = line_total(line)?;

            if acc
                .to_minor_units()
                .checked_add(line_total.to_minor_units())
                .is_none()
            {
                return Err(PricingError::Overflow(line.name().to_string()));
            }

            Ok(acc.add(line_total)?)
        })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso::{GBP, INR};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_by_quantity() -> TestResult {
        let quantity = NonZeroU32::new(3).ok_or("non-zero")?;
        let line = CartLine::with_quantity("Pen", Money::from_minor(1000, INR), quantity);

        assert_eq!(line_total(&line)?, Money::from_minor(3000, INR));

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_reported() {
        let line = CartLine::with_quantity(
            "Gold",
            Money::from_minor(i64::MAX, INR),
            NonZeroU32::MAX,
        );

        assert_eq!(
            line_total(&line),
            Err(PricingError::Overflow("Gold".to_string()))
        );
    }

    #[test]
    fn total_price_sums_lines() -> TestResult {
        let quantity = NonZeroU32::new(2).ok_or("non-zero")?;
        let lines = [
            CartLine::with_quantity("Pen", Money::from_minor(1000, INR), quantity),
            CartLine::new("Notebook", Money::from_minor(5000, INR)),
        ];

        assert_eq!(total_price(&lines, INR)?, Money::from_minor(7000, INR));

        Ok(())
    }

    #[test]
    fn total_price_overflow_is_reported() {
        let lines = [
            CartLine::new("Gold", Money::from_minor(i64::MAX / 2 + 1, INR)),
            CartLine::new("Platinum", Money::from_minor(i64::MAX / 2 + 1, INR)),
        ];

        assert_eq!(
            total_price(&lines, INR),
            Err(PricingError::Overflow("Platinum".to_string()))
        );
    }

    #[test]
    fn total_price_empty_is_zero() -> TestResult {
        assert_eq!(total_price(&[], GBP)?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn total_price_currency_mismatch_errors() {
        let lines = [CartLine::new("Pen", Money::from_minor(1000, GBP))];

        assert_eq!(
            total_price(&lines, INR),
            Err(PricingError::Money(MoneyError::CurrencyMismatch {
                expected: INR.iso_alpha_code,
                actual: GBP.iso_alpha_code,
            }))
        );
    }
}
