//! # Loan Ledger
//!
//! Balances are never stored. A loan's outstanding amount is derived on every
//! read from its original amount and the `Payment` transactions that name it.

use serde::Serialize;
use shared_types::Numeric;

use super::entities::{LoanId, LoanRequest, LoanStatus, Transaction};

/// Sum of all payments recorded against `loan_id`.
pub fn amount_paid(loan_id: LoanId, transactions: &[Transaction]) -> Numeric {
    payments_for(loan_id, transactions).map(|t| t.amount).sum()
}

/// `max(0, amount - paid)`. NaN amounts yield NaN.
pub fn remaining_balance(loan: &LoanRequest, transactions: &[Transaction]) -> Numeric {
    (loan.amount - amount_paid(loan.id, transactions)).clamp_non_negative()
}

fn payments_for(
    loan_id: LoanId,
    transactions: &[Transaction],
) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| t.is_payment() && t.loan_id == Some(loan_id))
}

/// Read-side summary of one loan's repayment position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanLedger {
    pub loan_id: LoanId,
    pub borrower_name: String,
    pub principal: Numeric,
    pub amount_paid: Numeric,
    pub remaining_balance: Numeric,
    pub payment_count: usize,
    /// Stored status of the loan.
    pub status: LoanStatus,
    /// Status to show: an `Active` loan with nothing left to pay reads as
    /// `Closed`. The stored status is not changed.
    pub display_status: LoanStatus,
}

impl LoanLedger {
    pub fn for_loan(loan: &LoanRequest, transactions: &[Transaction]) -> Self {
        let paid = amount_paid(loan.id, transactions);
        let remaining = (loan.amount - paid).clamp_non_negative();
        let repaid = !remaining.is_nan() && remaining.value() == 0.0;

        let display_status = match loan.status {
            LoanStatus::Active if repaid => LoanStatus::Closed,
            other => other,
        };

        Self {
            loan_id: loan.id,
            borrower_name: loan.borrower_name.clone(),
            principal: loan.amount,
            amount_paid: paid,
            remaining_balance: remaining,
            payment_count: payments_for(loan.id, transactions).count(),
            status: loan.status,
            display_status,
        }
    }

    pub fn is_repaid(&self) -> bool {
        !self.remaining_balance.is_nan() && self.remaining_balance.value() == 0.0
    }
}
