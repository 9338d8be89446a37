use async_trait::async_trait;

use crate::domain::account::{Account, CreateAccount};
use crate::domain::business_partner::{BusinessPartner, CreateBusinessPartner};
use crate::domain::reference::ResourceId;
use crate::domain::transaction::{CreateExchange, CreatePayment, Transaction};
use crate::error::Result;

/// One page of a listed collection. The backend is only ever asked for the
/// first page; `total_items` is exposed so callers can detect truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: Option<u64>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the server reported more records than this page holds.
    pub fn is_truncated(&self) -> bool {
        self.total_items
            .is_some_and(|total| (self.items.len() as u64) < total)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// The sole boundary between callers and the remote back office. One method
/// per backend operation; implementations hide transport details entirely.
#[async_trait]
pub trait BackofficeApi: Send + Sync {
    async fn list_business_partners(&self) -> Result<Page<BusinessPartner>>;
    async fn get_business_partner(&self, id: ResourceId) -> Result<BusinessPartner>;
    async fn create_business_partner(&self, input: CreateBusinessPartner)
    -> Result<BusinessPartner>;

    async fn list_accounts(&self) -> Result<Page<Account>>;
    async fn get_account(&self, id: ResourceId) -> Result<Account>;
    async fn create_account(&self, input: CreateAccount) -> Result<Account>;

    async fn list_transactions(&self) -> Result<Page<Transaction>>;
    async fn get_transaction(&self, id: ResourceId) -> Result<Transaction>;
    async fn create_payin(&self, input: CreatePayment) -> Result<Transaction>;
    async fn create_payout(&self, input: CreatePayment) -> Result<Transaction>;
    async fn create_exchange(&self, input: CreateExchange) -> Result<Transaction>;

    /// Releases a pending payout. The server rejects transactions that are
    /// not payouts or are already executed; the client does not pre-validate.
    async fn execute_payout(&self, id: ResourceId) -> Result<Transaction>;
}

pub type BackofficeApiBox = Box<dyn BackofficeApi>;
