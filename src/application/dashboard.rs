use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::account::{Account, CreateAccount};
use crate::domain::business_partner::{BusinessPartner, CreateBusinessPartner};
use crate::domain::ports::{BackofficeApi, BackofficeApiBox, Page};
use crate::domain::reference::{ResourceId, ResourceRef, index_by_id};
use crate::domain::transaction::{CreateExchange, CreatePayment, Transaction, TransactionType};
use crate::error::Result;

/// Aggregate figures for the dashboard view. The balance total is a display
/// aggregate only; the API remains the source of truth for all monetary
/// arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub partner_count: usize,
    pub account_count: usize,
    pub transaction_count: usize,
    pub payin_count: usize,
    pub payout_count: usize,
    pub pending_payouts: usize,
    pub total_balance: Decimal,
}

/// Holds the last-fetched snapshot per resource kind, refreshed wholesale.
///
/// Snapshots follow read/replace semantics: a list call replaces the whole
/// snapshot for that kind, never patches it. Mutating calls re-list the
/// affected kinds afterwards. The joint `refresh` replaces all three
/// snapshots only when every list call succeeded.
pub struct Dashboard {
    api: BackofficeApiBox,
    partners: RwLock<Page<BusinessPartner>>,
    accounts: RwLock<Page<Account>>,
    transactions: RwLock<Page<Transaction>>,
}

impl Dashboard {
    pub fn new(api: BackofficeApiBox) -> Self {
        Self {
            api,
            partners: RwLock::new(Page::empty()),
            accounts: RwLock::new(Page::empty()),
            transactions: RwLock::new(Page::empty()),
        }
    }

    /// Direct access to the underlying API for one-off lookups that do not
    /// touch the snapshots.
    pub fn api(&self) -> &dyn BackofficeApi {
        self.api.as_ref()
    }

    /// Fetches all three collections concurrently and replaces the snapshots
    /// once every call has succeeded. A single failure leaves every snapshot
    /// untouched.
    pub async fn refresh(&self) -> Result<()> {
        let (partners, accounts, transactions) = tokio::try_join!(
            self.api.list_business_partners(),
            self.api.list_accounts(),
            self.api.list_transactions(),
        )?;
        debug!(
            partners = partners.len(),
            accounts = accounts.len(),
            transactions = transactions.len(),
            "snapshots replaced"
        );

        *self.partners.write().await = partners;
        *self.accounts.write().await = accounts;
        *self.transactions.write().await = transactions;
        Ok(())
    }

    pub async fn load_partners(&self) -> Result<Page<BusinessPartner>> {
        let page = self.api.list_business_partners().await?;
        *self.partners.write().await = page.clone();
        Ok(page)
    }

    pub async fn load_accounts(&self) -> Result<Page<Account>> {
        let page = self.api.list_accounts().await?;
        *self.accounts.write().await = page.clone();
        Ok(page)
    }

    pub async fn load_transactions(&self) -> Result<Page<Transaction>> {
        let page = self.api.list_transactions().await?;
        *self.transactions.write().await = page.clone();
        Ok(page)
    }

    pub async fn partners(&self) -> Page<BusinessPartner> {
        self.partners.read().await.clone()
    }

    pub async fn accounts(&self) -> Page<Account> {
        self.accounts.read().await.clone()
    }

    pub async fn transactions(&self) -> Page<Transaction> {
        self.transactions.read().await.clone()
    }

    pub async fn create_business_partner(
        &self,
        input: CreateBusinessPartner,
    ) -> Result<BusinessPartner> {
        let created = self.api.create_business_partner(input).await?;
        self.load_partners().await?;
        Ok(created)
    }

    pub async fn create_account(&self, input: CreateAccount) -> Result<Account> {
        let created = self.api.create_account(input).await?;
        self.load_accounts().await?;
        Ok(created)
    }

    pub async fn create_payin(&self, input: CreatePayment) -> Result<Transaction> {
        let created = self.api.create_payin(input).await?;
        self.reload_money_views().await?;
        Ok(created)
    }

    pub async fn create_payout(&self, input: CreatePayment) -> Result<Transaction> {
        let created = self.api.create_payout(input).await?;
        self.reload_money_views().await?;
        Ok(created)
    }

    pub async fn create_exchange(&self, input: CreateExchange) -> Result<Transaction> {
        let created = self.api.create_exchange(input).await?;
        self.reload_money_views().await?;
        Ok(created)
    }

    pub async fn execute_payout(&self, id: ResourceId) -> Result<Transaction> {
        let executed = self.api.execute_payout(id).await?;
        self.reload_money_views().await?;
        Ok(executed)
    }

    // Money movements change account balances too, so both snapshots are
    // replaced together.
    async fn reload_money_views(&self) -> Result<()> {
        let (accounts, transactions) =
            tokio::try_join!(self.api.list_accounts(), self.api.list_transactions())?;
        *self.accounts.write().await = accounts;
        *self.transactions.write().await = transactions;
        Ok(())
    }

    /// Display name for a partner reference, resolved against the partner
    /// snapshot when only a stub is present.
    pub async fn partner_name(&self, reference: &ResourceRef<BusinessPartner>) -> String {
        let partners = self.partners.read().await;
        let lookup = index_by_id(&partners.items);
        reference
            .resolve(&lookup)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Display label for an account reference, e.g. `#3 EUR`.
    pub async fn account_label(&self, reference: &ResourceRef<Account>) -> String {
        let accounts = self.accounts.read().await;
        let lookup = index_by_id(&accounts.items);
        match reference.resolve(&lookup) {
            Some(account) => format!("#{} {}", account.id, account.currency),
            None => format!("account #{}", reference.id()),
        }
    }

    pub async fn summary(&self) -> DashboardSummary {
        let partners = self.partners.read().await;
        let accounts = self.accounts.read().await;
        let transactions = self.transactions.read().await;

        DashboardSummary {
            partner_count: partners.len(),
            account_count: accounts.len(),
            transaction_count: transactions.len(),
            payin_count: count_type(&transactions.items, TransactionType::Payin),
            payout_count: count_type(&transactions.items, TransactionType::Payout),
            pending_payouts: transactions
                .items
                .iter()
                .filter(|t| t.is_pending_payout())
                .count(),
            total_balance: accounts.items.iter().map(|a| a.balance).sum(),
        }
    }
}

fn count_type(transactions: &[Transaction], r#type: TransactionType) -> usize {
    transactions.iter().filter(|t| t.r#type == r#type).count()
}
