//! Ordered pricing operations reduced over a pure state.
//!
//! Every charge on a quote is expressed as a [`PricingOp`]. Ops are applied
//! in order; percent ops read the running subtotal as it stands immediately
//! before their own contribution. Each op rounds its line amount to whole
//! currency units at the moment it is computed, so line items always
//! reconcile exactly with the subtotal.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::TaskVariable;
use crate::domain::quote::LineItem;

/// Round to whole currency units, halves away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).normalize()
}

#[derive(Debug, Clone, PartialEq)]
pub enum PricingOp {
    /// The resolved base price for the job.
    Base { label: String, amount: Decimal },
    /// A quantity-priced line (items, rooms, hours).
    PerUnit { label: String, unit_price: Decimal, quantity: u32 },
    /// A fixed add-on.
    Flat { label: String, amount: Decimal },
    /// A surcharge computed on the running subtotal before this op.
    PercentOfRunning { label: String, percent: Decimal },
}

impl PricingOp {
    pub fn base(label: impl Into<String>, amount: Decimal) -> Self {
        Self::Base { label: label.into(), amount }
    }

    pub fn per_unit(label: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self::PerUnit { label: label.into(), unit_price, quantity }
    }

    pub fn flat(label: impl Into<String>, amount: Decimal) -> Self {
        Self::Flat { label: label.into(), amount }
    }

    pub fn percent_of_running(label: impl Into<String>, percent: Decimal) -> Self {
        Self::PercentOfRunning { label: label.into(), percent }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingState {
    pub subtotal: Decimal,
    pub lines: Vec<LineItem>,
}

impl PricingState {
    fn push(mut self, label: String, unit_price: Decimal, quantity: u32, amount: Decimal) -> Self {
        self.subtotal += amount;
        self.lines.push(LineItem { label, unit_price, quantity, amount });
        self
    }

    pub fn apply(self, op: &PricingOp) -> Self {
        match op {
            PricingOp::Base { label, amount } | PricingOp::Flat { label, amount } => {
                let amount = round_currency(*amount);
                self.push(label.clone(), amount, 1, amount)
            }
            PricingOp::PerUnit { label, unit_price, quantity } => {
                let amount = round_currency(unit_price * Decimal::from(*quantity));
                self.push(label.clone(), *unit_price, *quantity, amount)
            }
            PricingOp::PercentOfRunning { label, percent } => {
                let amount = round_currency(self.subtotal * percent);
                self.push(label.clone(), amount, 1, amount)
            }
        }
    }
}

/// Reduce a full op sequence into its final state.
pub fn run(ops: &[PricingOp]) -> PricingState {
    ops.iter().fold(PricingState::default(), PricingState::apply)
}

/// Resolve a task's base price plus at most one delta per variable axis.
/// Unknown axes and unknown option values contribute nothing.
pub fn apply_modifiers(
    base: Decimal,
    axes: &[TaskVariable],
    selected: &BTreeMap<String, String>,
) -> Decimal {
    axes.iter().fold(base, |price, axis| {
        match selected.get(&axis.axis).and_then(|value| axis.option(value)) {
            Some(option) => price + option.delta,
            None => price,
        }
    })
}
