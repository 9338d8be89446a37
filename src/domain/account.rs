use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::business_partner::BusinessPartner;
use crate::domain::reference::{Identified, ResourceId, ResourcePath, ResourceRef};
use crate::domain::transaction::Transaction;
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum Currency {
    CHF,
    EUR,
    USD,
    GBP,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::CHF => "CHF",
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHF" => Ok(Self::CHF),
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            other => Err(ApiError::InvalidInput(format!(
                "unknown currency '{other}' (expected CHF, EUR, USD or GBP)"
            ))),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CHF => "CHF",
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
        };
        f.pad(s)
    }
}

/// An account record. The balance travels as a decimal string on the wire;
/// it is parsed into `Decimal` for display only. The API owns all monetary
/// arithmetic.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: ResourceId,
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub business_partner: ResourceRef<BusinessPartner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl Identified for Account {
    fn id(&self) -> ResourceId {
        self.id
    }
}

/// Request body for opening an account. The owning partner is referenced by
/// path string, never as a nested object.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub business_partner: ResourcePath,
}

/// Two-decimal display form of an amount or balance.
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_string_round_trip() {
        let json = r#"{
            "id": 5,
            "currency": "EUR",
            "balance": "1250.50",
            "businessPartner": {"id": 7}
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.balance, dec!(1250.50));
        assert_eq!(account.business_partner, ResourceRef::Stub { id: 7 });

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["balance"], "1250.50");
    }

    #[test]
    fn test_create_body_references_partner_by_path() {
        let input = CreateAccount {
            currency: Currency::EUR,
            balance: Decimal::ZERO,
            business_partner: ResourcePath::business_partner(7),
        };
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "currency": "EUR",
                "balance": "0",
                "businessPartner": "/api/business_partners/7"
            })
        );
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(12.5)), "12.50");
        assert_eq!(format_amount(dec!(1250.50)), "1250.50");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("GBP").unwrap(), Currency::GBP);
        assert!(Currency::from_str("JPY").is_err());
    }
}
