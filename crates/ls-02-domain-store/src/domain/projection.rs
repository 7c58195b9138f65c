//! # Role Projections
//!
//! Read-only, role-filtered views of the collections. Each function is a pure
//! function of `(collection, viewer)`; nothing is cached.
//!
//! | Collection   | admin | lender                          | borrower          | analyst |
//! |--------------|-------|---------------------------------|-------------------|---------|
//! | Accounts     | all   | borrowers only                  | none              | all     |
//! | Loans        | all   | decided or offered by self      | own               | all     |
//! | Offers       | all   | own                             | all (marketplace) | all     |
//! | Transactions | all   | payments of own loans' borrowers | own payments     | all     |

use std::collections::HashSet;

use shared_types::{Account, Principal, Role};

use super::entities::{LoanRequest, LoanStatus, Offer, Transaction};

pub fn visible_accounts<'a>(accounts: &'a [Account], viewer: &Principal) -> Vec<&'a Account> {
    match viewer.role {
        Role::Admin | Role::Analyst => accounts.iter().collect(),
        Role::Lender => accounts.iter().filter(|a| a.role == Role::Borrower).collect(),
        Role::Borrower => Vec::new(),
    }
}

pub fn visible_loans<'a>(loans: &'a [LoanRequest], viewer: &Principal) -> Vec<&'a LoanRequest> {
    match viewer.role {
        Role::Admin | Role::Analyst => loans.iter().collect(),
        Role::Lender => lender_loans(loans, &viewer.name).collect(),
        Role::Borrower => loans
            .iter()
            .filter(|l| l.borrower_name == viewer.name)
            .collect(),
    }
}

pub fn visible_offers<'a>(offers: &'a [Offer], viewer: &Principal) -> Vec<&'a Offer> {
    match viewer.role {
        Role::Lender => offers.iter().filter(|o| o.lender_name == viewer.name).collect(),
        Role::Admin | Role::Analyst | Role::Borrower => offers.iter().collect(),
    }
}

/// Transactions visible to `viewer`. Lenders see payments made by any
/// borrower on one of their loans; borrowers see their own payments.
pub fn visible_transactions<'a>(
    transactions: &'a [Transaction],
    loans: &[LoanRequest],
    viewer: &Principal,
) -> Vec<&'a Transaction> {
    match viewer.role {
        Role::Admin | Role::Analyst => transactions.iter().collect(),
        Role::Lender => {
            let borrowers: HashSet<&str> = lender_loans(loans, &viewer.name)
                .map(|l| l.borrower_name.as_str())
                .collect();
            transactions
                .iter()
                .filter(|t| t.is_payment() && borrowers.contains(t.borrower_name.as_str()))
                .collect()
        }
        Role::Borrower => transactions
            .iter()
            .filter(|t| t.is_payment() && t.borrower_name == viewer.name)
            .collect(),
    }
}

/// Pending applications awaiting any lender's decision.
pub fn review_queue(loans: &[LoanRequest]) -> Vec<&LoanRequest> {
    loans
        .iter()
        .filter(|l| l.status == LoanStatus::Pending)
        .collect()
}

fn lender_loans<'a: 'b, 'b>(
    loans: &'a [LoanRequest],
    lender_name: &'b str,
) -> impl Iterator<Item = &'a LoanRequest> + 'b {
    loans
        .iter()
        .filter(move |l| l.approved_by_lender_name.as_deref() == Some(lender_name))
}
