//! Quote calculation for a booking selection.
//!
//! `total = max(0, base + option delta + Σ add-ons) × (1 − discount / 100)`
//!
//! Ids that do not resolve against the catalog contribute nothing; a missing
//! service zeroes the whole quote. Amounts are held in integer cents and the
//! discounted total is rounded half-up to the cent.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog;

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// An amount of Singapore dollars stored as cents.
///
/// Serializes as a decimal dollar figure (`153.0`, `109.25`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Clamp negative amounts to zero.
    pub fn floor_zero(self) -> Self {
        Self(self.0.max(0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}S${}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

// ---------------------------------------------------------------------------
// Selection and quote
// ---------------------------------------------------------------------------

/// What the customer has picked so far. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Selection {
    pub service_id: Option<String>,
    pub option_id: Option<String>,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
    pub frequency_id: Option<String>,
}

/// A priced selection with its full breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub base_price: Money,
    pub option_delta: Money,
    pub add_ons_total: Money,
    /// `max(0, base + option delta + add-ons)`.
    pub subtotal: Money,
    pub discount_percent: u8,
    pub discount: Money,
    pub total: Money,
}

/// Price a selection. Never fails.
pub fn quote(selection: &Selection) -> Quote {
    let Some(service) = selection
        .service_id
        .as_deref()
        .and_then(catalog::find_service)
    else {
        return Quote::default();
    };

    let option_delta = selection
        .option_id
        .as_deref()
        .and_then(|option_id| catalog::find_option(service.id, option_id))
        .map_or(Money::ZERO, |o| Money::from_dollars(o.price_delta));

    let add_ons_total: Money = selection
        .add_on_ids
        .iter()
        .filter_map(|id| catalog::find_add_on(id))
        .map(|a| Money::from_dollars(a.price))
        .sum();

    let discount_percent = selection
        .frequency_id
        .as_deref()
        .and_then(catalog::find_frequency)
        .map_or(0, |f| f.discount_percent);

    let base_price = Money::from_dollars(service.base_price);
    let subtotal = (base_price + option_delta + add_ons_total).floor_zero();
    let total = apply_discount(subtotal, discount_percent);

    Quote {
        base_price,
        option_delta,
        add_ons_total,
        subtotal,
        discount_percent,
        discount: subtotal - total,
        total,
    }
}

/// Shorthand for `quote(selection).total`.
pub fn calculate_total(selection: &Selection) -> Money {
    quote(selection).total
}

/// Scale a non-negative amount by `(100 - percent) / 100`, rounding half-up.
///
/// Percentages above 100 are treated as 100.
pub fn apply_discount(amount: Money, percent: u8) -> Money {
    let keep = 100 - i64::from(percent.min(100));
    let cents = amount.floor_zero().cents();
    Money::from_cents((cents * keep + 50) / 100)
}
