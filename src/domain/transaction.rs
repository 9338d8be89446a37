use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::account::Account;
use crate::domain::reference::{Identified, ResourceId, ResourcePath, ResourceRef};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Payin,
    Payout,
    Exchange,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Payin => "payin",
            Self::Payout => "payout",
            Self::Exchange => "exchange",
        };
        f.pad(s)
    }
}

/// A money movement on an account. Only payouts go through an explicit
/// execute step; payins and exchanges are settled on creation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: ResourceId,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub name: String,
    pub date: NaiveDate,
    pub executed: bool,
    pub r#type: TransactionType,
    pub country: String,
    pub iban: String,
    pub account: ResourceRef<Account>,
}

impl Transaction {
    /// A payout that has not been released yet.
    pub fn is_pending_payout(&self) -> bool {
        self.r#type == TransactionType::Payout && !self.executed
    }
}

impl Identified for Transaction {
    fn id(&self) -> ResourceId {
        self.id
    }
}

/// Request body shared by payin and payout creation; the transaction type is
/// implied by the endpoint, not carried in the body.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CreatePayment {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub name: String,
    pub date: NaiveDate,
    pub country: String,
    pub iban: String,
    pub account: ResourcePath,
}

/// Request body for a currency exchange. Two legs on the wire, but the API
/// reports it back as a single transaction; the client never computes the
/// resulting balances.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchange {
    pub from_account: ResourcePath,
    pub to_account: ResourcePath,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub name: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_deserialization() {
        let json = r#"{
            "id": 9,
            "amount": "250.00",
            "name": "Supplier settlement",
            "date": "2024-03-15",
            "executed": false,
            "type": "payout",
            "country": "CH",
            "iban": "CH9300762011623852957",
            "account": {"id": 2}
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.r#type, TransactionType::Payout);
        assert_eq!(tx.amount, dec!(250.00));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(tx.is_pending_payout());
    }

    #[test]
    fn test_only_unexecuted_payouts_are_pending() {
        let json = r#"{
            "id": 9,
            "amount": "250.00",
            "name": "Supplier settlement",
            "date": "2024-03-15",
            "executed": true,
            "type": "payout",
            "country": "CH",
            "iban": "CH9300762011623852957",
            "account": {"id": 2}
        }"#;
        let executed: Transaction = serde_json::from_str(json).unwrap();
        assert!(!executed.is_pending_payout());

        let payin = Transaction {
            r#type: TransactionType::Payin,
            executed: false,
            ..executed
        };
        assert!(!payin.is_pending_payout());
    }

    #[test]
    fn test_exchange_body_uses_wire_field_names() {
        let input = CreateExchange {
            from_account: ResourcePath::account(1),
            to_account: ResourcePath::account(2),
            amount: dec!(100),
            name: "EUR to CHF".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body["fromAccount"], "/api/accounts/1");
        assert_eq!(body["toAccount"], "/api/accounts/2");
        assert_eq!(body["amount"], "100");
        assert_eq!(body["date"], "2024-03-15");
    }

    #[test]
    fn test_payment_body_passes_account_path_verbatim() {
        let input = CreatePayment {
            amount: dec!(42.50),
            name: "Invoice 1042".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            country: "FR".to_string(),
            iban: "FR1420041010050500013M02606".to_string(),
            account: ResourcePath::account(3),
        };
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body["account"], "/api/accounts/3");
        assert_eq!(body["amount"], "42.50");
        assert!(body.get("type").is_none());
    }
}
