//! Terminal rendering of cart contents and the product catalog.

use std::{io, ops::Range};

use tabled::{
    Table,
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, catalog::Catalog, items::CartLine, pricing::PricingError};

/// Message shown in place of the line table when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is currently empty.";

/// Errors that can occur while rendering a cart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A line or cart total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write the cart's lines, subtotal, total and badge count.
///
/// # Errors
///
/// Returns a [`RenderError`] if totals overflow or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "{EMPTY_CART_MESSAGE}")?;
    } else {
        writeln!(out, "\n{}", lines_table(cart.lines())?)?;
    }

    let subtotal = cart.subtotal()?;
    let total = cart.total()?;

    writeln!(out, " Subtotal: {subtotal}")?;
    writeln!(out, " \x1b[1mTotal:\x1b[0m    \x1b[1m{total}\x1b[0m")?;

    write_badge(&mut out, cart)
}

/// Write the badge showing the number of units in the cart.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_badge(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    writeln!(out, " Items:    {}", cart.item_count())?;

    Ok(())
}

/// Build the line table shared by the cart view and the checkout receipt.
pub(crate) fn lines_table(lines: &[CartLine]) -> Result<Table, PricingError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Unit Price", "Qty", "Line Total"]);

    for (position, line) in (1_usize..).zip(lines) {
        builder.push_record([
            position.to_string(),
            line.name().to_string(),
            line.unit_price().to_string(),
            line.quantity().to_string(),
            line.line_total()?.to_string(),
        ]);
    }

    Ok(themed(builder, 2..5))
}

/// Write the catalog as a table of keys, names and prices, sorted by key.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Key", "Product", "Price"]);

    for (key, product) in catalog.iter() {
        builder.push_record([key.to_string(), product.name.clone(), product.price.to_string()]);
    }

    writeln!(out, "\n{}", themed(builder, 2..3))
}

/// Build a table with a bold header row, a single header separator and right-aligned money
/// columns.
fn themed(builder: Builder, money_columns: Range<usize>) -> Table {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(money_columns), Alignment::right());

    table
}
