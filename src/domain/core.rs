mod booking;
mod feedback;
mod pricing;
mod vehicle;

use std::fmt::{self, Display};

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

pub use self::booking::*;
pub use self::feedback::*;
pub use self::pricing::*;
pub use self::vehicle::*;

/// 通貨
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    INR,
    USD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
        }
    }

    pub fn scale(&self) -> i64 {
        100
    }
}

/// 金額
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn from_major(major: f64, currency: Currency) -> Option<Self> {
        let minor = (major * currency.scale() as f64).round();
        if !minor.is_finite() || minor.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Self::new(minor as i64, currency))
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn to_major(&self) -> f64 {
        self.amount as f64 / self.currency.scale() as f64
    }

    pub fn discount(&self, percent: u8) -> Self {
        let kept = 100 - i64::from(percent.min(100));
        // 結果は常に i64 に収まる
        let amount = (i128::from(self.amount) * i128::from(kept) + 50).div_euclid(100);
        Self::new(amount as i64, self.currency)
    }

    pub fn to_decimal_string(&self) -> String {
        let scale = self.currency.scale();
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}.{:02}",
            sign,
            abs / scale as u64,
            abs % scale as u64
        )
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.currency.scale() as u64;
        let abs = self.amount.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            if self.amount < 0 { "-" } else { "" },
            self.currency.symbol(),
            (abs / scale).to_formatted_string(&Locale::en),
            abs % scale
        )
    }
}
