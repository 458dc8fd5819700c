//! Versioned JSON envelope for persisted carts.
//!
//! ```json
//! {"version":1,"currency":"INR","lines":[{"name":"Pen","price":10.00,"quantity":2}]}
//! ```
//!
//! Prices are written as exact decimal numbers in major units, so a cart reads back unchanged.
//!
//! A bare array of lines (the unversioned layout) is read as version 0 and priced in the
//! caller's currency.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize, de};
use serde_json::Value;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    items::CartLine,
    money::{PriceError, currency_from_code, from_major_units, to_major_units},
};

/// Schema version written by [`encode`].
pub const SCHEMA_VERSION: u32 = 1;

/// Reasons a stored cart cannot be read back.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Not JSON, or JSON of the wrong shape.
    #[error("malformed cart data: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope was written by an unknown schema version.
    #[error("unsupported cart schema version {0}")]
    UnsupportedVersion(u64),

    /// The envelope has no usable version field.
    #[error("cart envelope is missing its version")]
    MissingVersion,

    /// The stored currency differs from the session currency.
    #[error("stored cart uses {found}, expected {expected}")]
    CurrencyMismatch {
        /// Currency recorded in the envelope
        found: &'static str,
        /// Currency of the session
        expected: &'static str,
    },

    /// A stored quantity is zero, negative or too large.
    #[error("invalid stored quantity {quantity} for {name}")]
    InvalidQuantity {
        /// Line name
        name: String,
        /// Stored quantity
        quantity: i64,
    },

    /// A stored price or currency code could not be parsed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The lines violate a cart invariant.
    #[error(transparent)]
    Cart(#[from] CartError),
}

#[derive(Debug, Serialize, Deserialize)]
struct LineRecord {
    name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
    quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct EnvelopeRecord {
    version: u32,
    currency: String,
    lines: Vec<LineRecord>,
}

/// Serialize a cart into the current envelope format.
///
/// # Errors
///
/// Returns an [`EnvelopeError`] if the envelope cannot be serialized.
pub fn encode(cart: &Cart) -> Result<String, EnvelopeError> {
    let lines = cart
        .iter()
        .map(|line| LineRecord {
            name: line.name().to_string(),
            price: to_major_units(line.unit_price()),
            quantity: i64::from(line.quantity()),
        })
        .collect();

    let record = EnvelopeRecord {
        version: SCHEMA_VERSION,
        currency: cart.currency().iso_alpha_code.to_string(),
        lines,
    };

    Ok(serde_json::to_string(&record)?)
}

/// Parse a stored value back into a cart priced in `currency`.
///
/// # Errors
///
/// Returns an [`EnvelopeError`] if the value is not a supported envelope, or if its lines
/// would not form a valid cart.
pub fn decode(serialized: &str, currency: &'static Currency) -> Result<Cart, EnvelopeError> {
    let value: Value = serde_json::from_str(serialized)?;

    let lines = match value {
        Value::Array(_) => serde_json::from_value::<Vec<LineRecord>>(value)?,
        Value::Object(ref fields) => {
            let version = fields
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(EnvelopeError::MissingVersion)?;

            if version != u64::from(SCHEMA_VERSION) {
                return Err(EnvelopeError::UnsupportedVersion(version));
            }

            let record = serde_json::from_value::<EnvelopeRecord>(value)?;
            let stored_currency = currency_from_code(&record.currency)?;

            if stored_currency != currency {
                return Err(EnvelopeError::CurrencyMismatch {
                    found: stored_currency.iso_alpha_code,
                    expected: currency.iso_alpha_code,
                });
            }

            record.lines
        }
        other => {
            return Err(EnvelopeError::Json(<serde_json::Error as de::Error>::custom(format!(
                "expected a cart envelope, found {other}"
            ))));
        }
    };

    let lines = lines
        .into_iter()
        .map(|record| line_from_record(record, currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::with_lines(lines, currency)?)
}

fn line_from_record(
    record: LineRecord,
    currency: &'static Currency,
) -> Result<CartLine, EnvelopeError> {
    let quantity = u32::try_from(record.quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| EnvelopeError::InvalidQuantity {
            name: record.name.clone(),
            quantity: record.quantity,
        })?;

    let unit_price = from_major_units(record.price, currency)?;

    Ok(CartLine::with_quantity(record.name, unit_price, quantity))
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, INR},
    };
    use testresult::TestResult;

    use super::*;

    fn stocked() -> TestResult<Cart> {
        let mut cart = Cart::new(INR);

        cart.add("Pen", Money::from_minor(1000, INR))?;
        cart.add("Pen", Money::from_minor(1000, INR))?;
        cart.add("Notebook", Money::from_minor(5050, INR))?;

        Ok(cart)
    }

    #[test]
    fn encode_writes_versioned_envelope() -> TestResult {
        let encoded = encode(&stocked()?)?;
        let value: Value = serde_json::from_str(&encoded)?;

        assert_eq!(value["version"], 1);
        assert_eq!(value["currency"], "INR");
        assert_eq!(value["lines"][0]["name"], "Pen");
        assert_eq!(value["lines"][0]["price"], 10.0);
        assert_eq!(value["lines"][0]["quantity"], 2);
        assert_eq!(value["lines"][1]["price"], 50.5);
        assert!(encoded.contains(r#""price":10.00"#));

        Ok(())
    }

    #[test]
    fn decode_reproduces_encoded_cart() -> TestResult {
        let cart = stocked()?;

        assert_eq!(decode(&encode(&cart)?, INR)?, cart);

        Ok(())
    }

    #[test]
    fn decode_keeps_prices_beyond_f64_precision() -> TestResult {
        let mut cart = Cart::new(INR);

        cart.add("Gold", Money::from_minor(9_007_199_254_740_993, INR))?;

        let encoded = encode(&cart)?;
        let decoded = decode(&encoded, INR)?;

        assert!(encoded.contains(r#""price":90071992547409.93"#));
        assert_eq!(
            decoded.get("Gold").map(|line| line.unit_price().to_minor_units()),
            Some(9_007_199_254_740_993)
        );
        assert_eq!(decoded, cart);

        Ok(())
    }

    #[test]
    fn decode_rounds_legacy_prices_to_minor_units() -> TestResult {
        let cart = decode(r#"[{"name":"Pen","price":10.004,"quantity":1}]"#, INR)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(1000, INR));

        Ok(())
    }

    #[test]
    fn decode_empty_envelope() -> TestResult {
        let cart = decode(r#"{"version":1,"currency":"INR","lines":[]}"#, INR)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn decode_migrates_unversioned_array() -> TestResult {
        let cart = decode(
            r#"[{"name":"Pen","price":10,"quantity":2},{"name":"Notebook","price":50.0,"quantity":1}]"#,
            INR,
        )?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("Pen").map(CartLine::quantity), Some(2));
        assert_eq!(cart.subtotal()?, Money::from_minor(7000, INR));

        Ok(())
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let result = decode(r#"{"version":2,"currency":"INR","lines":[]}"#, INR);

        assert!(matches!(result, Err(EnvelopeError::UnsupportedVersion(2))));
    }

    #[test]
    fn decode_rejects_missing_version() {
        let result = decode(r#"{"currency":"INR","lines":[]}"#, INR);

        assert!(matches!(result, Err(EnvelopeError::MissingVersion)));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("not json", INR), Err(EnvelopeError::Json(_))));
        assert!(matches!(decode("42", INR), Err(EnvelopeError::Json(_))));
        assert!(matches!(
            decode(r#"[{"name":"Pen"}]"#, INR),
            Err(EnvelopeError::Json(_))
        ));
    }

    #[test]
    fn decode_rejects_non_positive_quantity() {
        let result = decode(r#"[{"name":"Pen","price":10,"quantity":0}]"#, INR);

        assert!(matches!(
            result,
            Err(EnvelopeError::InvalidQuantity { quantity: 0, .. })
        ));
    }

    #[test]
    fn decode_rejects_negative_price() {
        let result = decode(r#"[{"name":"Pen","price":-1,"quantity":1}]"#, INR);

        assert!(matches!(
            result,
            Err(EnvelopeError::Cart(CartError::NegativePrice(_)))
        ));
    }

    #[test]
    fn decode_rejects_duplicate_names() {
        let result = decode(
            r#"[{"name":"Pen","price":10,"quantity":1},{"name":"Pen","price":10,"quantity":1}]"#,
            INR,
        );

        assert!(matches!(
            result,
            Err(EnvelopeError::Cart(CartError::DuplicateLine(_)))
        ));
    }

    #[test]
    fn decode_rejects_other_currency() {
        let result = decode(r#"{"version":1,"currency":"GBP","lines":[]}"#, INR);

        assert!(matches!(
            result,
            Err(EnvelopeError::CurrencyMismatch { found, expected })
                if found == GBP.iso_alpha_code && expected == INR.iso_alpha_code
        ));
    }
}
