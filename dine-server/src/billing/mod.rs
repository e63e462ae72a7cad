//! Bill calculation using rust_decimal for precision
//!
//! All arithmetic runs on `Decimal`; every output figure is rounded to two
//! decimal places half-up before it is persisted or returned. Figures are
//! always recomputed from the order lines, never read back and adjusted.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Default tax rate in percent
pub const DEFAULT_TAX_PERCENTAGE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// One order line as the calculator sees it
#[derive(Debug, Clone, Copy)]
pub struct BillLine {
    pub unit_price: Decimal,
    pub quantity: i64,
}

/// Computed bill figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillFigures {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Round to two places half-up, keeping the scale at exactly two
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    // Exact quotients can come back with a smaller scale; force two places
    // so stored and serialized figures always read "15.00", never "15".
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Compute subtotal, tax and total for a set of lines
///
/// `tax_percentage` is a percent value (5.00 means 5%). Each intermediate
/// figure is rounded independently, so `total = subtotal + tax_amount` holds
/// exactly on the rounded values.
pub fn compute(lines: &[BillLine], tax_percentage: Decimal) -> BillFigures {
    let raw_subtotal: Decimal = lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum();

    let subtotal = round_money(raw_subtotal);
    let tax_amount = round_money(subtotal * tax_percentage / Decimal::ONE_HUNDRED);
    let total_amount = round_money(subtotal + tax_amount);

    BillFigures {
        subtotal,
        tax_amount,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(price: &str, quantity: i64) -> BillLine {
        BillLine {
            unit_price: dec(price),
            quantity,
        }
    }

    #[test]
    fn test_default_rate_constant() {
        assert_eq!(DEFAULT_TAX_PERCENTAGE, dec("5.00"));
    }

    #[test]
    fn test_two_items_at_five_percent() {
        let figures = compute(&[line("150.00", 2)], dec("5.00"));
        assert_eq!(figures.subtotal, dec("300.00"));
        assert_eq!(figures.tax_amount, dec("15.00"));
        assert_eq!(figures.total_amount, dec("315.00"));
    }

    #[test]
    fn test_half_up_rounding() {
        // 10.10 * 5% = 0.505, rounds up to 0.51
        let figures = compute(&[line("10.10", 1)], dec("5.00"));
        assert_eq!(figures.subtotal, dec("10.10"));
        assert_eq!(figures.tax_amount, dec("0.51"));
        assert_eq!(figures.total_amount, dec("10.61"));
    }

    #[test]
    fn test_total_is_sum_of_rounded_parts() {
        let figures = compute(
            &[line("3.33", 3), line("7.77", 1), line("0.99", 5)],
            dec("8.25"),
        );
        assert_eq!(figures.total_amount, figures.subtotal + figures.tax_amount);
        assert_eq!(figures.subtotal, dec("22.71"));
    }

    #[test]
    fn test_figures_keep_two_places() {
        let figures = compute(&[line("150.00", 2)], dec("5.00"));
        assert_eq!(figures.tax_amount.to_string(), "15.00");
        assert_eq!(figures.total_amount.to_string(), "315.00");
    }

    #[test]
    fn test_zero_keeps_two_places() {
        assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_empty_order() {
        let figures = compute(&[], dec("5.00"));
        assert_eq!(figures.subtotal, Decimal::ZERO);
        assert_eq!(figures.tax_amount, Decimal::ZERO);
        assert_eq!(figures.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_tax_rate() {
        let figures = compute(&[line("12.50", 4)], Decimal::ZERO);
        assert_eq!(figures.subtotal, dec("50.00"));
        assert_eq!(figures.tax_amount, dec("0.00"));
        assert_eq!(figures.total_amount, dec("50.00"));
    }
}
