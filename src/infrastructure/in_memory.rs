use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, CreateAccount};
use crate::domain::business_partner::{BusinessPartner, CreateBusinessPartner};
use crate::domain::ports::{BackofficeApi, Page};
use crate::domain::reference::{ResourceId, ResourceRef};
use crate::domain::transaction::{CreateExchange, CreatePayment, Transaction, TransactionType};
use crate::error::{ApiError, Result};

#[derive(Default)]
struct State {
    next_id: ResourceId,
    partners: Vec<BusinessPartner>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl State {
    fn allocate_id(&mut self) -> ResourceId {
        self.next_id += 1;
        self.next_id
    }

    fn account_exists(&self, id: ResourceId) -> bool {
        self.accounts.iter().any(|a| a.id == id)
    }
}

/// An in-memory stand-in for the remote back office that enforces the same
/// rules the real server does: sequential server-assigned ids, 404s for
/// unknown records, and the payout execution lifecycle. Lets the application
/// layer and CLI be exercised without a network.
#[derive(Default, Clone)]
pub struct InMemoryBackofficeApi {
    state: Arc<RwLock<State>>,
}

impl InMemoryBackofficeApi {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(kind: &str, id: ResourceId) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{kind} {id} not found"),
    }
}

fn unprocessable(message: impl Into<String>) -> ApiError {
    ApiError::Status {
        status: 422,
        message: message.into(),
    }
}

impl InMemoryBackofficeApi {
    async fn create_transaction(
        &self,
        input: CreatePayment,
        r#type: TransactionType,
        executed: bool,
    ) -> Result<Transaction> {
        let mut state = self.state.write().await;
        let account_id = input
            .account
            .id()
            .ok_or_else(|| unprocessable(format!("invalid account reference '{}'", input.account)))?;
        if !state.account_exists(account_id) {
            return Err(not_found("account", account_id));
        }

        let id = state.allocate_id();
        let tx = Transaction {
            id,
            amount: input.amount,
            name: input.name,
            date: input.date,
            executed,
            r#type,
            country: input.country,
            iban: input.iban,
            account: ResourceRef::Stub { id: account_id },
        };
        state.transactions.push(tx.clone());
        Ok(tx)
    }
}

#[async_trait]
impl BackofficeApi for InMemoryBackofficeApi {
    async fn list_business_partners(&self) -> Result<Page<BusinessPartner>> {
        let state = self.state.read().await;
        Ok(Page {
            items: state.partners.clone(),
            total_items: Some(state.partners.len() as u64),
        })
    }

    async fn get_business_partner(&self, id: ResourceId) -> Result<BusinessPartner> {
        let state = self.state.read().await;
        state
            .partners
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("business partner", id))
    }

    async fn create_business_partner(
        &self,
        input: CreateBusinessPartner,
    ) -> Result<BusinessPartner> {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let partner = BusinessPartner {
            id,
            name: input.name,
            status: input.status,
            legal_form: input.legal_form,
            address: input.address,
            city: input.city,
            zip: input.zip,
            country: input.country,
            accounts: None,
        };
        state.partners.push(partner.clone());
        Ok(partner)
    }

    async fn list_accounts(&self) -> Result<Page<Account>> {
        let state = self.state.read().await;
        Ok(Page {
            items: state.accounts.clone(),
            total_items: Some(state.accounts.len() as u64),
        })
    }

    async fn get_account(&self, id: ResourceId) -> Result<Account> {
        let state = self.state.read().await;
        state
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("account", id))
    }

    async fn create_account(&self, input: CreateAccount) -> Result<Account> {
        let mut state = self.state.write().await;
        let partner_id = input.business_partner.id().ok_or_else(|| {
            unprocessable(format!(
                "invalid business partner reference '{}'",
                input.business_partner
            ))
        })?;
        if !state.partners.iter().any(|p| p.id == partner_id) {
            return Err(not_found("business partner", partner_id));
        }

        let id = state.allocate_id();
        let account = Account {
            id,
            currency: input.currency,
            balance: input.balance,
            business_partner: ResourceRef::Stub { id: partner_id },
            transactions: None,
        };
        state.accounts.push(account.clone());
        Ok(account)
    }

    async fn list_transactions(&self) -> Result<Page<Transaction>> {
        let state = self.state.read().await;
        Ok(Page {
            items: state.transactions.clone(),
            total_items: Some(state.transactions.len() as u64),
        })
    }

    async fn get_transaction(&self, id: ResourceId) -> Result<Transaction> {
        let state = self.state.read().await;
        state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| not_found("transaction", id))
    }

    async fn create_payin(&self, input: CreatePayment) -> Result<Transaction> {
        // Payins settle on creation; there is no execute step for them.
        self.create_transaction(input, TransactionType::Payin, true)
            .await
    }

    async fn create_payout(&self, input: CreatePayment) -> Result<Transaction> {
        // Payouts start unexecuted and wait for an explicit release.
        self.create_transaction(input, TransactionType::Payout, false)
            .await
    }

    async fn create_exchange(&self, input: CreateExchange) -> Result<Transaction> {
        let mut state = self.state.write().await;
        for leg in [&input.from_account, &input.to_account] {
            let account_id = leg
                .id()
                .ok_or_else(|| unprocessable(format!("invalid account reference '{leg}'")))?;
            if !state.account_exists(account_id) {
                return Err(not_found("account", account_id));
            }
        }

        // The API models the two legs as a single settled transaction hung
        // off the source account.
        let from_id = input.from_account.id().unwrap_or_default();
        let id = state.allocate_id();
        let tx = Transaction {
            id,
            amount: input.amount,
            name: input.name,
            date: input.date,
            executed: true,
            r#type: TransactionType::Exchange,
            country: String::new(),
            iban: String::new(),
            account: ResourceRef::Stub { id: from_id },
        };
        state.transactions.push(tx.clone());
        Ok(tx)
    }

    async fn execute_payout(&self, id: ResourceId) -> Result<Transaction> {
        let mut state = self.state.write().await;
        let tx = state
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("transaction", id))?;

        if tx.r#type != TransactionType::Payout {
            return Err(unprocessable(format!(
                "transaction {id} is a {} and cannot be executed",
                tx.r#type
            )));
        }
        if tx.executed {
            return Err(unprocessable(format!("payout {id} is already executed")));
        }

        tx.executed = true;
        Ok(tx.clone())
    }
}
