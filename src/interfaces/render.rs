use crate::application::dashboard::DashboardSummary;
use crate::domain::account::{Account, format_amount};
use crate::domain::business_partner::BusinessPartner;
use crate::domain::transaction::Transaction;

/// Plain-text rows for CLI output. Amounts always render with two decimals;
/// reference fields arrive pre-resolved as display strings.
pub fn partner_row(partner: &BusinessPartner) -> String {
    format!(
        "#{:<4} {:<30} {:<10} {:<10} {}, {} {}, {}",
        partner.id,
        partner.name,
        partner.status,
        partner.legal_form,
        partner.address,
        partner.zip,
        partner.city,
        partner.country,
    )
}

pub fn account_row(account: &Account, partner_name: &str) -> String {
    format!(
        "#{:<4} {:<4} {:>14}  {}",
        account.id,
        account.currency,
        format_amount(account.balance),
        partner_name,
    )
}

pub fn transaction_row(tx: &Transaction, account_label: &str) -> String {
    let state = if tx.executed { "executed" } else { "pending" };
    format!(
        "#{:<4} {:<8} {:>14}  {}  {:<8}  {:<30} {}",
        tx.id,
        tx.r#type,
        format_amount(tx.amount),
        tx.date,
        state,
        tx.name,
        account_label,
    )
}

pub fn summary_block(summary: &DashboardSummary) -> String {
    format!(
        "partners:         {}\n\
         accounts:         {}\n\
         total balance:    {}\n\
         transactions:     {}\n\
         payins:           {}\n\
         payouts:          {} ({} pending)",
        summary.partner_count,
        summary.account_count,
        format_amount(summary.total_balance),
        summary.transaction_count,
        summary.payin_count,
        summary.payout_count,
        summary.pending_payouts,
    )
}
