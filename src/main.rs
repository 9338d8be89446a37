use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use backoffice::application::dashboard::Dashboard;
use backoffice::config::ApiConfig;
use backoffice::domain::account::{CreateAccount, Currency};
use backoffice::domain::business_partner::{CreateBusinessPartner, LegalForm, PartnerStatus};
use backoffice::domain::ports::BackofficeApiBox;
use backoffice::domain::reference::ResourcePath;
use backoffice::domain::transaction::{CreateExchange, CreatePayment};
use backoffice::infrastructure::http::HttpBackofficeApi;
use backoffice::interfaces::render;

#[derive(Parser)]
#[command(author, version, about = "Administrative CLI for the back-office API", long_about = None)]
struct Cli {
    /// API base URL (overrides BACKOFFICE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Business partner operations
    #[command(subcommand)]
    Partners(PartnerCommand),

    /// Account operations
    #[command(subcommand)]
    Accounts(AccountCommand),

    /// Transaction operations
    #[command(subcommand)]
    Transactions(TransactionCommand),

    /// Joint summary across partners, accounts and transactions
    Dashboard,
}

#[derive(Subcommand)]
enum PartnerCommand {
    /// List business partners
    List,
    /// Fetch one business partner by id
    Get { id: u64 },
    /// Create a business partner
    Create {
        #[arg(long)]
        name: String,
        /// active, inactive or pending
        #[arg(long, value_parser = PartnerStatus::from_str)]
        status: PartnerStatus,
        /// SA, SARL, SNC or individual
        #[arg(long, value_parser = LegalForm::from_str)]
        legal_form: LegalForm,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        zip: String,
        /// Two-letter country code
        #[arg(long)]
        country: String,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    /// List accounts with their owning partners
    List,
    /// Fetch one account by id
    Get { id: u64 },
    /// Open an account for a business partner
    Create {
        /// CHF, EUR, USD or GBP
        #[arg(long, value_parser = Currency::from_str)]
        currency: Currency,
        #[arg(long, value_parser = parse_decimal)]
        balance: Decimal,
        /// Owning business partner id
        #[arg(long)]
        partner: u64,
    },
}

#[derive(Subcommand)]
enum TransactionCommand {
    /// List transactions with their accounts
    List,
    /// Fetch one transaction by id
    Get { id: u64 },
    /// Create a pay-in (settles immediately)
    Payin(PaymentArgs),
    /// Create a pay-out (stays pending until executed)
    Payout(PaymentArgs),
    /// Create a currency exchange between two accounts
    Exchange {
        /// Source account id
        #[arg(long)]
        from_account: u64,
        /// Destination account id
        #[arg(long)]
        to_account: u64,
        #[arg(long, value_parser = parse_decimal)]
        amount: Decimal,
        #[arg(long)]
        name: String,
        /// Value date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Execute a pending payout
    Execute { id: u64 },
}

#[derive(Args)]
struct PaymentArgs {
    #[arg(long, value_parser = parse_decimal)]
    amount: Decimal,
    #[arg(long)]
    name: String,
    /// Value date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
    /// Two-letter country code
    #[arg(long)]
    country: String,
    #[arg(long)]
    iban: String,
    /// Account id the movement belongs to
    #[arg(long)]
    account: u64,
}

impl From<PaymentArgs> for CreatePayment {
    fn from(args: PaymentArgs) -> Self {
        Self {
            amount: args.amount,
            name: args.name,
            date: args.date,
            country: args.country,
            iban: args.iban,
            account: ResourcePath::account(args.account),
        }
    }
}

fn parse_decimal(s: &str) -> std::result::Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(s)
}

fn parse_date(s: &str) -> chrono::format::ParseResult<NaiveDate> {
    NaiveDate::from_str(s)
}

fn print_truncation(shown: usize, total: Option<u64>) {
    if let Some(total) = total
        && (shown as u64) < total
    {
        println!("(showing {shown} of {total})");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match cli.api_url {
        Some(ref url) => ApiConfig::new(url.as_str()),
        None => ApiConfig::from_env(),
    };
    let api: BackofficeApiBox = Box::new(HttpBackofficeApi::new(config).into_diagnostic()?);
    let dashboard = Dashboard::new(api);

    match cli.command {
        Command::Partners(PartnerCommand::List) => {
            let page = dashboard.load_partners().await.into_diagnostic()?;
            for partner in &page.items {
                println!("{}", render::partner_row(partner));
            }
            print_truncation(page.len(), page.total_items);
        }
        Command::Partners(PartnerCommand::Get { id }) => {
            let partner = dashboard
                .api()
                .get_business_partner(id)
                .await
                .into_diagnostic()?;
            println!("{}", render::partner_row(&partner));
        }
        Command::Partners(PartnerCommand::Create {
            name,
            status,
            legal_form,
            address,
            city,
            zip,
            country,
        }) => {
            let created = dashboard
                .create_business_partner(CreateBusinessPartner {
                    name,
                    status,
                    legal_form,
                    address,
                    city,
                    zip,
                    country,
                })
                .await
                .into_diagnostic()?;
            println!("{}", render::partner_row(&created));
        }
        Command::Accounts(AccountCommand::List) => {
            // The account view also needs partner names for stub references.
            let (page, _) =
                tokio::try_join!(dashboard.load_accounts(), dashboard.load_partners())
                    .into_diagnostic()?;
            for account in &page.items {
                let owner = dashboard.partner_name(&account.business_partner).await;
                println!("{}", render::account_row(account, &owner));
            }
            print_truncation(page.len(), page.total_items);
        }
        Command::Accounts(AccountCommand::Get { id }) => {
            let account = dashboard.api().get_account(id).await.into_diagnostic()?;
            let owner = dashboard.partner_name(&account.business_partner).await;
            println!("{}", render::account_row(&account, &owner));
        }
        Command::Accounts(AccountCommand::Create {
            currency,
            balance,
            partner,
        }) => {
            let created = dashboard
                .create_account(CreateAccount {
                    currency,
                    balance,
                    business_partner: ResourcePath::business_partner(partner),
                })
                .await
                .into_diagnostic()?;
            let owner = dashboard.partner_name(&created.business_partner).await;
            println!("{}", render::account_row(&created, &owner));
        }
        Command::Transactions(TransactionCommand::List) => {
            let (page, _) =
                tokio::try_join!(dashboard.load_transactions(), dashboard.load_accounts())
                    .into_diagnostic()?;
            for tx in &page.items {
                let label = dashboard.account_label(&tx.account).await;
                println!("{}", render::transaction_row(tx, &label));
            }
            print_truncation(page.len(), page.total_items);
        }
        Command::Transactions(TransactionCommand::Get { id }) => {
            let tx = dashboard.api().get_transaction(id).await.into_diagnostic()?;
            let label = dashboard.account_label(&tx.account).await;
            println!("{}", render::transaction_row(&tx, &label));
        }
        Command::Transactions(TransactionCommand::Payin(args)) => {
            let created = dashboard.create_payin(args.into()).await.into_diagnostic()?;
            let label = dashboard.account_label(&created.account).await;
            println!("{}", render::transaction_row(&created, &label));
        }
        Command::Transactions(TransactionCommand::Payout(args)) => {
            let created = dashboard
                .create_payout(args.into())
                .await
                .into_diagnostic()?;
            let label = dashboard.account_label(&created.account).await;
            println!("{}", render::transaction_row(&created, &label));
        }
        Command::Transactions(TransactionCommand::Exchange {
            from_account,
            to_account,
            amount,
            name,
            date,
        }) => {
            let created = dashboard
                .create_exchange(CreateExchange {
                    from_account: ResourcePath::account(from_account),
                    to_account: ResourcePath::account(to_account),
                    amount,
                    name,
                    date,
                })
                .await
                .into_diagnostic()?;
            let label = dashboard.account_label(&created.account).await;
            println!("{}", render::transaction_row(&created, &label));
        }
        Command::Transactions(TransactionCommand::Execute { id }) => {
            let executed = dashboard.execute_payout(id).await.into_diagnostic()?;
            let label = dashboard.account_label(&executed.account).await;
            println!("{}", render::transaction_row(&executed, &label));
        }
        Command::Dashboard => {
            dashboard.refresh().await.into_diagnostic()?;
            let summary = dashboard.summary().await;
            println!("{}", render::summary_block(&summary));
        }
    }

    Ok(())
}
