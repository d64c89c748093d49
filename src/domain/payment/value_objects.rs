use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::PaymentError;
use crate::domain::ids::{OrderId, PaymentIntentId};

// ============================================================================
// Payment Value Objects
// ============================================================================

/// Phone number normalized to an optional `+` followed by 8 to 15 digits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, PaymentError> {
        let trimmed = raw.trim();
        let (plus, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(PaymentError::InvalidPhoneNumber(raw.to_string())),
            }
        }

        if !(8..=15).contains(&digits.len()) {
            return Err(PaymentError::InvalidPhoneNumber(raw.to_string()));
        }

        Ok(Self(format!("{plus}{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobileMoneyProvider {
    Mtn,
    Orange,
    Moov,
    Wave,
}

impl std::str::FromStr for MobileMoneyProvider {
    type Err = PaymentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MTN" => Ok(Self::Mtn),
            "ORANGE" => Ok(Self::Orange),
            "MOOV" => Ok(Self::Moov),
            "WAVE" => Ok(Self::Wave),
            _ => Err(PaymentError::UnknownProvider(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Paid on delivery or settled manually
    Cash,
    /// Card payment confirmed client-side with the returned secret
    Stripe,
    #[serde(rename_all = "camelCase")]
    MobileMoney {
        phone_number: PhoneNumber,
        provider: MobileMoneyProvider,
    },
}

impl PaymentMethod {
    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::MobileMoney { .. } => "mobile_money",
        }
    }
}

/// Body of `POST /payments/intent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub order_id: OrderId,
    #[serde(flatten)]
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub status: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}
