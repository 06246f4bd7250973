use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DocumentLine, DocumentLineInput};

/// One editable line as the calculator sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRow {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Percentage, 0..=100
    pub discount_percent: Decimal,
}

impl LineRow {
    pub fn new(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            discount_percent,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.quantity, self.unit_price, self.discount_percent)
    }
}

impl From<&DocumentLine> for LineRow {
    fn from(line: &DocumentLine) -> Self {
        Self::new(line.quantity, line.unit_price, line.discount_percent)
    }
}

impl From<&DocumentLineInput> for LineRow {
    fn from(line: &DocumentLineInput) -> Self {
        Self::new(line.quantity, line.unit_price, line.discount_percent)
    }
}

/// `quantity * unit_price * (1 - discount/100)` with the discount clamped to
/// `[0, 100]`. Never rounded.
pub fn line_subtotal(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    let discount = discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    quantity * unit_price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl DocumentTotals {
    /// `tax_rate` is a fraction (0.21 for 21%)
    pub fn compute<'a, I>(rows: I, tax_rate: Decimal) -> Self
    where
        I: IntoIterator<Item = &'a LineRow>,
    {
        let subtotal: Decimal = rows.into_iter().map(LineRow::subtotal).sum();
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn for_lines(lines: &[DocumentLineInput], tax_rate: Decimal) -> Self {
        let rows: Vec<LineRow> = lines.iter().map(LineRow::from).collect();
        Self::compute(&rows, tax_rate)
    }
}

/// Two decimals, midpoint away from zero, followed by the currency symbol
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2} {}", rounded, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_half_discount() {
        assert_eq!(line_subtotal(d(2), d(10), d(50)), d(10));
    }

    #[test]
    fn test_same_inputs_same_output() {
        let first = line_subtotal(Decimal::new(3, 0), Decimal::new(1999, 2), Decimal::new(15, 0));
        let second = line_subtotal(Decimal::new(3, 0), Decimal::new(1999, 2), Decimal::new(15, 0));
        assert_eq!(first, second);
        assert_eq!(first, Decimal::new(509745, 4));
    }

    #[test]
    fn test_discount_is_clamped() {
        assert_eq!(line_subtotal(d(1), d(80), d(150)), Decimal::ZERO);
        assert_eq!(line_subtotal(d(1), d(80), d(-10)), d(80));
    }

    #[test]
    fn test_totals_apply_tax_to_sum_of_lines() {
        let rows = [LineRow::new(d(2), d(10), d(50)), LineRow::new(d(1), d(90), d(0))];
        let totals = DocumentTotals::compute(&rows, Decimal::new(21, 2));

        assert_eq!(totals.subtotal, d(100));
        assert_eq!(totals.tax, d(21));
        assert_eq!(totals.total, d(121));
    }

    #[test]
    fn test_empty_document_is_zero() {
        let rows: [LineRow; 0] = [];
        let totals = DocumentTotals::compute(&rows, Decimal::new(21, 2));
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_happens_only_on_format() {
        let totals = DocumentTotals::compute(&[LineRow::new(d(1), Decimal::new(1005, 3), d(0))], Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(1005, 3));
        assert_eq!(format_amount(totals.total, "€"), "1.01 €");
        assert_eq!(format_amount(Decimal::new(-1005, 3), "€"), "-1.01 €");
    }
}
