//! # Portfolio Analytics
//!
//! Aggregate figures for the analyst and admin dashboards. All values are
//! computed from the collections on demand.
//!
//! Non-numeric amounts and rates count as zero in every sum, so a single
//! malformed application does not turn a whole report into NaN.

use std::collections::BTreeMap;

use serde::Serialize;
use shared_types::{Account, AccountStatus, Numeric, Role};

use super::entities::{LoanRequest, LoanStatus, Transaction};

/// Share of repaid principal reported as interest earned.
pub const INTEREST_YIELD: f64 = 0.05;

/// Loan count above which two extra high-risk borrowers are assumed.
pub const HIGH_RISK_PORTFOLIO_SIZE: usize = 5;

fn or_zero(value: Numeric) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.value()
    }
}

fn sum_by<T>(items: &[T], f: impl Fn(&T) -> Numeric) -> Numeric {
    Numeric::new(items.iter().map(|item| or_zero(f(item))).sum())
}

fn count_status(loans: &[LoanRequest], status: LoanStatus) -> usize {
    loans.iter().filter(|l| l.status == status).count()
}

/// Financial overview of the whole loan book.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub loan_count: usize,
    pub total_issued: Numeric,
    /// Sum of every transaction, whatever its kind.
    pub total_transacted: Numeric,
    /// Sum of `Payment` transactions.
    pub total_repaid: Numeric,
    pub interest_earned: Numeric,
    /// `Σ amount × rate / 100` over all loans.
    pub projected_interest: Numeric,
    pub default_losses: Numeric,
    /// Rounded mean principal; zero for an empty book.
    pub average_loan_size: Numeric,
    pub average_interest_rate: Numeric,
    /// Loan count per status, every status present.
    pub status_distribution: BTreeMap<LoanStatus, usize>,
}

impl PortfolioSummary {
    pub fn compute(loans: &[LoanRequest], transactions: &[Transaction]) -> Self {
        let loan_count = loans.len();
        let total_issued = sum_by(loans, |l| l.amount);
        let payments: Vec<&Transaction> = transactions.iter().filter(|t| t.is_payment()).collect();
        let total_repaid = Numeric::new(payments.iter().map(|t| or_zero(t.amount)).sum());
        let default_losses = Numeric::new(
            loans
                .iter()
                .filter(|l| l.status == LoanStatus::Defaulted)
                .map(|l| or_zero(l.amount))
                .sum(),
        );

        let (average_loan_size, average_interest_rate) = if loan_count == 0 {
            (Numeric::ZERO, Numeric::ZERO)
        } else {
            let n = loan_count as f64;
            (
                Numeric::new(total_issued.value() / n).round_half_up(),
                Numeric::new(sum_by(loans, |l| l.interest_rate).value() / n),
            )
        };

        Self {
            loan_count,
            total_issued,
            total_transacted: sum_by(transactions, |t| t.amount),
            total_repaid,
            interest_earned: total_repaid * INTEREST_YIELD,
            projected_interest: Numeric::new(
                loans
                    .iter()
                    .map(|l| or_zero(l.amount) * or_zero(l.interest_rate) / 100.0)
                    .sum(),
            ),
            default_losses,
            average_loan_size,
            average_interest_rate,
            status_distribution: LoanStatus::ALL
                .iter()
                .map(|status| (*status, count_status(loans, *status)))
                .collect(),
        }
    }
}

/// Heuristic risk indicators for the analyst view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub defaulted_loans: usize,
    /// Distinct defaulting borrowers, plus two when the book holds more than
    /// five loans.
    pub high_risk_borrowers: usize,
    /// One flag per five active loans.
    pub late_payment_flags: usize,
    /// `min(100, defaults × 15 + late flags × 5)`.
    pub risk_score: u32,
}

impl RiskAssessment {
    pub fn compute(loans: &[LoanRequest]) -> Self {
        let defaulted: Vec<&LoanRequest> = loans
            .iter()
            .filter(|l| l.status == LoanStatus::Defaulted)
            .collect();
        let mut borrowers: Vec<&str> = defaulted.iter().map(|l| l.borrower_name.as_str()).collect();
        borrowers.sort_unstable();
        borrowers.dedup();

        let padding = if loans.len() > HIGH_RISK_PORTFOLIO_SIZE { 2 } else { 0 };
        let late_payment_flags = count_status(loans, LoanStatus::Active) / 5;
        let raw_score = defaulted.len() * 15 + late_payment_flags * 5;

        Self {
            defaulted_loans: defaulted.len(),
            high_risk_borrowers: borrowers.len() + padding,
            late_payment_flags,
            risk_score: raw_score.min(100) as u32,
        }
    }
}

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub account_count: usize,
    pub accounts_by_role: BTreeMap<Role, usize>,
    pub blocked_accounts: usize,
    pub loan_count: usize,
    pub active_loans: usize,
    pub pending_review: usize,
    pub transaction_count: usize,
    pub transaction_volume: Numeric,
    pub activity_entries: usize,
}

impl AdminOverview {
    pub fn compute(
        accounts: &[Account],
        loans: &[LoanRequest],
        transactions: &[Transaction],
        activity_entries: usize,
    ) -> Self {
        Self {
            account_count: accounts.len(),
            accounts_by_role: Role::ALL
                .iter()
                .map(|role| (*role, accounts.iter().filter(|a| a.role == *role).count()))
                .collect(),
            blocked_accounts: accounts
                .iter()
                .filter(|a| a.status == AccountStatus::Blocked)
                .count(),
            loan_count: loans.len(),
            active_loans: count_status(loans, LoanStatus::Active),
            pending_review: count_status(loans, LoanStatus::Pending),
            transaction_count: transactions.len(),
            transaction_volume: sum_by(transactions, |t| t.amount),
            activity_entries,
        }
    }
}
