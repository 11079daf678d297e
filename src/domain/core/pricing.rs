use derive_more::{Display, Error};

use crate::Pricing;

use super::{Currency, Money, VehicleClass};

/// 基本料金の上限 (最小単位)
pub const MAX_BASE: i64 = 100_000_000_000;

/// 料金表
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTable {
    two_wheeler: Money,
    three_wheeler: Money,
    four_wheeler: Money,
    premium_discount: u8,
    currency: Currency,
}

impl PriceTable {
    pub fn new(
        two_wheeler: Money,
        three_wheeler: Money,
        four_wheeler: Money,
        premium_discount: u8,
    ) -> Result<Self, PricingError> {
        let currency = two_wheeler.currency();
        for base in [two_wheeler, three_wheeler, four_wheeler] {
            if base.amount() < 0 {
                return Err(PricingError::NegativeBase);
            }
            if base.amount() > MAX_BASE {
                return Err(PricingError::BaseTooLarge);
            }
            if base.currency() != currency {
                return Err(PricingError::MixedCurrency);
            }
        }
        if premium_discount > 100 {
            return Err(PricingError::InvalidDiscount(premium_discount));
        }
        Ok(Self {
            two_wheeler,
            three_wheeler,
            four_wheeler,
            premium_discount,
            currency,
        })
    }

    pub fn from_config(config: &Pricing) -> Result<Self, PricingError> {
        let base = |major: f64| {
            if !major.is_finite() {
                return Err(PricingError::NotANumber);
            }
            Money::from_major(major, config.currency).ok_or(PricingError::BaseTooLarge)
        };
        Self::new(
            base(config.two_wheeler)?,
            base(config.three_wheeler)?,
            base(config.four_wheeler)?,
            config.premium_discount,
        )
    }

    pub fn base(&self, class: VehicleClass) -> Money {
        match class {
            VehicleClass::TwoWheeler => self.two_wheeler,
            VehicleClass::ThreeWheeler => self.three_wheeler,
            VehicleClass::FourWheeler => self.four_wheeler,
        }
    }

    pub fn price(&self, class: Option<VehicleClass>, premium: bool) -> Money {
        match class {
            Some(class) if premium => self.base(class).discount(self.premium_discount),
            Some(class) => self.base(class),
            None => Money::zero(self.currency),
        }
    }

    pub fn quote(&self, vehicle: &str, premium: bool) -> Money {
        self.price(vehicle.parse().ok(), premium)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            two_wheeler: Money::new(50000, Currency::INR),
            three_wheeler: Money::new(75000, Currency::INR),
            four_wheeler: Money::new(100000, Currency::INR),
            premium_discount: 10,
            currency: Currency::INR,
        }
    }
}

/// 料金表エラー
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[display(fmt = "Base price cannot be negative")]
    NegativeBase,
    #[display(fmt = "Base price is not a number")]
    NotANumber,
    #[display(fmt = "Base price is too large")]
    BaseTooLarge,
    #[display(fmt = "All base prices must share one currency")]
    MixedCurrency,
    #[display(fmt = "Premium discount must be between 0 and 100, got {}", _0)]
    InvalidDiscount(#[error(not(source))] u8),
}
