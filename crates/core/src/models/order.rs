use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::required_text;
use crate::{
    errors::{BookingError, BookingResult},
    notify::Notification,
};

/// Raw `POST /place_order` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub order_details: Option<String>,
    #[serde(default)]
    pub total_price: Value,
}

/// An order that passed presence checks. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub order_details: String,
    pub total_price: String,
}

impl TryFrom<PlaceOrderRequest> for Order {
    type Error = BookingError;

    fn try_from(request: PlaceOrderRequest) -> BookingResult<Self> {
        let total_price = match request.total_price {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s),
            _ => None,
        };

        Ok(Self {
            name: required_text("name", request.name, None)?,
            phone: required_text("phone", request.phone, None)?,
            address: required_text("address", request.address, None)?,
            order_details: required_text("orderDetails", request.order_details, None)?,
            total_price: required_text("totalPrice", total_price, None)?,
        })
    }
}

impl Order {
    pub fn notification(&self) -> Notification {
        Notification {
            subject: format!("New Food Order from {}", self.name),
            body: format!(
                "You have a new food order from your website:\n\n\
                 Customer Details:\n\
                 -----------------\n\
                 Name: {}\n\
                 Phone: {}\n\
                 Address: {}\n\n\
                 Order Details:\n\
                 --------------\n\
                 {}\n\n\
                 -----------------\n\
                 Total Price: ${}\n",
                self.name, self.phone, self.address, self.order_details, self.total_price
            ),
        }
    }
}
