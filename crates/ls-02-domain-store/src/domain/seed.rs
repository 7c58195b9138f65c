//! # Demo Dataset
//!
//! Initial state used on first run and whenever a persisted collection cannot
//! be read. One account per role, all signing in with `password`.

use serde_json::json;
use shared_types::{Account, AccountId, AccountStatus, Numeric, PasswordSecret, Role};

use super::entities::{
    stage_names, ActivityLogEntry, LoanId, LoanRequest, LoanStatus, Offer, OfferId, Stage,
    Transaction, TransactionId, TransactionKind, TransactionStatus,
};

/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "password";

fn seed_account(id: u64, name: &str, email: &str, role: Role) -> Account {
    Account {
        id: AccountId(id),
        name: name.to_string(),
        email: email.to_string(),
        // Fixed salts keep the seeded collection byte-stable across runs
        password_secret: Some(PasswordSecret::derive_with_salt(
            SEED_PASSWORD,
            &format!("seed-{id}"),
        )),
        role,
        status: AccountStatus::Active,
        extra: Default::default(),
    }
}

pub fn accounts() -> Vec<Account> {
    let mut lender = seed_account(2, "John Lender", "lender@loansphere.com", Role::Lender);
    lender.extra.insert("totalCapital".to_string(), json!(500000));

    vec![
        seed_account(1, "Admin User", "admin@loansphere.com", Role::Admin),
        lender,
        seed_account(3, "Alice Borrower", "borrower@loansphere.com", Role::Borrower),
        seed_account(4, "Sarah Analyst", "analyst@loansphere.com", Role::Analyst),
    ]
}

struct SeedLoan<'a> {
    id: u64,
    borrower: &'a str,
    amount: f64,
    status: LoanStatus,
    rate: f64,
    term: u32,
    purpose: &'a str,
    start: &'a str,
    next_date: Option<&'a str>,
    next_amount: f64,
    lender: Option<&'a str>,
    stage_dates: &'a [&'a str],
}

impl SeedLoan<'_> {
    fn build(&self) -> LoanRequest {
        // No tracker at all when no stage has been reached
        let stages = if self.stage_dates.is_empty() {
            Vec::new()
        } else {
            stage_names::TRACKER
                .iter()
                .enumerate()
                .map(|(i, name)| match self.stage_dates.get(i) {
                    Some(date) => Stage::completed_on(name, *date),
                    None => Stage::pending(name),
                })
                .collect()
        };

        LoanRequest {
            id: LoanId(self.id),
            borrower_name: self.borrower.to_string(),
            amount: Numeric::new(self.amount),
            purpose: self.purpose.to_string(),
            status: self.status,
            interest_rate: Numeric::new(self.rate),
            term_months: Numeric::from(self.term),
            start_date: self.start.to_string(),
            next_payment_date: self.next_date.map(str::to_string),
            next_payment_amount: Numeric::new(self.next_amount),
            approved_by_lender_name: self.lender.map(str::to_string),
            stages,
        }
    }
}

pub fn loans() -> Vec<LoanRequest> {
    [
        SeedLoan {
            id: 101,
            borrower: "Alice Borrower",
            amount: 50000.0,
            status: LoanStatus::Active,
            rate: 5.5,
            term: 12,
            purpose: "Home Renovation",
            start: "2023-01-15",
            next_date: Some("2023-10-15"),
            next_amount: 4350.0,
            lender: Some("John Lender"),
            stage_dates: &["2023-01-10", "2023-01-12", "2023-01-14", "2023-01-15"],
        },
        SeedLoan {
            id: 102,
            borrower: "Bob Smith",
            amount: 25000.0,
            status: LoanStatus::Pending,
            rate: 6.0,
            term: 24,
            purpose: "Business Expansion",
            start: "2023-02-20",
            next_date: Some("2023-03-20"),
            next_amount: 1150.0,
            lender: Some("John Lender"),
            stage_dates: &["2023-02-18", "2023-02-19"],
        },
        SeedLoan {
            id: 103,
            borrower: "Charlie Brown",
            amount: 100000.0,
            status: LoanStatus::Closed,
            rate: 4.5,
            term: 36,
            purpose: "Vehicle Purchase",
            start: "2022-05-10",
            next_date: None,
            next_amount: 0.0,
            lender: None,
            stage_dates: &[],
        },
        SeedLoan {
            id: 104,
            borrower: "Alice Borrower",
            amount: 10000.0,
            status: LoanStatus::Pending,
            rate: 7.0,
            term: 6,
            purpose: "Personal Loan",
            start: "2023-03-01",
            next_date: None,
            next_amount: 1750.0,
            lender: Some("John Lender"),
            stage_dates: &["2023-03-01"],
        },
    ]
    .iter()
    .map(SeedLoan::build)
    .collect()
}

pub fn offers() -> Vec<Offer> {
    [
        (1, 50000.0, 5.5, 12, "John Lender"),
        (2, 25000.0, 6.0, 24, "John Lender"),
        (3, 100000.0, 4.5, 36, "Other Lender"),
    ]
    .into_iter()
    .map(|(id, amount, rate, term, lender): (u64, f64, f64, u32, &str)| Offer {
        id: OfferId(id),
        amount: Numeric::new(amount),
        interest_rate: Numeric::new(rate),
        term_months: Numeric::from(term),
        description: String::new(),
        optional_terms: String::new(),
        lender_name: lender.to_string(),
    })
    .collect()
}

pub fn transactions() -> Vec<Transaction> {
    [
        ("TXN001", "2023-03-01", 1500.0, TransactionKind::Payment, "Alice Borrower", 101),
        ("TXN002", "2023-02-28", 50000.0, TransactionKind::Disbursement, "Alice Borrower", 101),
        ("TXN003", "2023-02-25", 200.0, TransactionKind::Fee, "Bob Smith", 102),
    ]
    .into_iter()
    .map(|(id, date, amount, kind, borrower, loan)| Transaction {
        id: TransactionId(id.to_string()),
        date: date.to_string(),
        amount: Numeric::new(amount),
        kind,
        status: TransactionStatus::Success,
        borrower_name: borrower.to_string(),
        loan_id: Some(LoanId(loan)),
    })
    .collect()
}

pub fn activity_log() -> Vec<ActivityLogEntry> {
    [
        ("User Login", "Admin User", "Successful login from IP 192.168.1.1", "2 mins ago"),
        ("Loan Approved", "John Lender", "Approved Loan #101 for Alice Borrower", "15 mins ago"),
        ("New Registration", "System", "New borrower registered: Jane Doe", "1 hour ago"),
        ("Payment Received", "System", "Received $4350 from Loan #101", "3 hours ago"),
        ("Security Alert", "System", "Failed login attempt detected", "5 hours ago"),
    ]
    .into_iter()
    .map(|(action, actor, details, time)| ActivityLogEntry {
        action: action.to_string(),
        actor_label: actor.to_string(),
        details: details.to_string(),
        time: time.to_string(),
    })
    .collect()
}
