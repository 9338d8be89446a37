use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::account::Account;
use crate::domain::reference::{Identified, ResourceId};
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    Active,
    Inactive,
    Pending,
}

impl FromStr for PartnerStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            other => Err(ApiError::InvalidInput(format!(
                "unknown partner status '{other}' (expected active, inactive or pending)"
            ))),
        }
    }
}

impl fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        };
        f.pad(s)
    }
}

/// Legal form of a partner. Wire values are mixed-case: the company forms
/// are uppercase, `individual` is not.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum LegalForm {
    SA,
    SARL,
    SNC,
    #[serde(rename = "individual")]
    Individual,
}

impl FromStr for LegalForm {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SA" => Ok(Self::SA),
            "SARL" => Ok(Self::SARL),
            "SNC" => Ok(Self::SNC),
            "individual" => Ok(Self::Individual),
            other => Err(ApiError::InvalidInput(format!(
                "unknown legal form '{other}' (expected SA, SARL, SNC or individual)"
            ))),
        }
    }
}

impl fmt::Display for LegalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SA => "SA",
            Self::SARL => "SARL",
            Self::SNC => "SNC",
            Self::Individual => "individual",
        };
        f.pad(s)
    }
}

/// A business partner record. The `accounts` sequence is present only when
/// the server chose to embed it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPartner {
    pub id: ResourceId,
    pub name: String,
    pub status: PartnerStatus,
    pub legal_form: LegalForm,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Account>>,
}

impl Identified for BusinessPartner {
    fn id(&self) -> ResourceId {
        self.id
    }
}

/// Request body for creating a partner. The id is assigned server-side.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessPartner {
    pub name: String,
    pub status: PartnerStatus,
    pub legal_form: LegalForm,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}
