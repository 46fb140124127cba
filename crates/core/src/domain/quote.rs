use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceId;

/// Which calculation path produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Current,
    Legacy,
}

/// Whether the quoted total is a one-time charge or a monthly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    OneTime,
    Monthly,
}

/// One positive charge on a quote. `amount` is always `unit_price * quantity`
/// rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub amount: Decimal,
}

impl LineItem {
    pub fn flat(label: impl Into<String>, amount: Decimal) -> Self {
        Self { label: label.into(), unit_price: amount, quantity: 1, amount }
    }
}

/// One reduction applied after the subtotal. `amount` is the positive number
/// of currency units removed from the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub label: String,
    pub percent: Decimal,
    pub amount: Decimal,
}

/// Crew sizing attached to quotes for services where duration drives staffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewEstimate {
    pub estimated_hours: Decimal,
    pub pros: u32,
}

/// A fully assembled price quote for a single service.
///
/// Line items and discount lines reconcile exactly:
/// `subtotal == sum(line_items.amount)` and
/// `total == max(subtotal - sum(discounts.amount), floor)` where the floor is
/// the service minimum charge (applied only when the pre-floor total is
/// strictly positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub service_id: ServiceId,
    pub service_name: String,
    pub line_items: Vec<LineItem>,
    pub discounts: Vec<DiscountLine>,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub minimum_applied: bool,
    pub billing: BillingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<CrewEstimate>,
    pub source: QuoteSource,
}

impl Quote {
    /// Display form of the total, e.g. `$294` or `$99/mo`.
    pub fn formatted_total(&self) -> String {
        match self.billing {
            BillingMode::OneTime => format!("${}", self.total),
            BillingMode::Monthly => format!("${}/mo", self.total),
        }
    }

    pub fn total_discount(&self) -> Decimal {
        self.discounts.iter().map(|d| d.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_total_reflects_billing_mode() {
        let quote = Quote {
            service_id: ServiceId::new("pool_cleaning"),
            service_name: "Pool Cleaning".to_string(),
            line_items: vec![LineItem::flat("Basic plan", Decimal::from(99))],
            discounts: vec![],
            subtotal: Decimal::from(99),
            total: Decimal::from(99),
            minimum_applied: false,
            billing: BillingMode::Monthly,
            crew: None,
            source: QuoteSource::Current,
        };
        assert_eq!(quote.formatted_total(), "$99/mo");
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuoteSource::Legacy).expect("serialize source"),
            "\"legacy\""
        );
    }
}
