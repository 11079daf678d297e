use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{StorageError, ValidationError};

use super::{Money, PriceTable, VehicleClass};

/// 予約リポジトリ
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 予約を一行書き込む
    async fn save(&self, booking: &Booking) -> Result<(), StorageError>;
}

/// 予約フォームの入力
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub name: String,
    pub contact: String,
    pub vehicle: String,
    #[serde(default)]
    pub premium: bool,
}

/// 予約エンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    name: String,
    contact: String,
    vehicle: VehicleClass,
    premium: bool,
    cost: Money,
    booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn create(
        form: &BookingForm,
        prices: &PriceTable,
        booked_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = form.name.trim();
        let contact = form.contact.trim();
        Self::validate_name(name)?;
        Self::validate_contact(contact)?;
        let vehicle = Self::validate_vehicle(&form.vehicle)?;
        Ok(Booking {
            name: name.to_owned(),
            contact: contact.to_owned(),
            vehicle,
            premium: form.premium,
            cost: prices.price(Some(vehicle), form.premium),
            booked_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn vehicle(&self) -> VehicleClass {
        self.vehicle
    }

    pub fn premium(&self) -> bool {
        self.premium
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }

    pub fn service_label(&self) -> &'static str {
        if self.premium {
            "Premium Service"
        } else {
            "Regular Service"
        }
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::NameIsBlank);
        }
        Ok(())
    }

    fn validate_contact(contact: &str) -> Result<(), ValidationError> {
        if contact.is_empty() {
            return Err(ValidationError::ContactIsBlank);
        }
        Ok(())
    }

    fn validate_vehicle(vehicle: &str) -> Result<VehicleClass, ValidationError> {
        vehicle
            .parse()
            .map_err(|_| ValidationError::UnrecognizedVehicle(vehicle.to_owned()))
    }
}
