//! # Loan Lifecycle
//!
//! Construction of loan requests and offers from form input, and the status
//! transitions of a loan together with its stage tracker.
//!
//! ```text
//!            approve             close
//! Pending ───────────→ Active ─────────→ Closed
//!    │                   │
//!    │ reject            │ mark_defaulted
//!    ↓                   ↓
//! Rejected           Defaulted
//! ```
//!
//! The tracker is never reordered; transitions only flip `completed` and
//! stamp `date` on entries that already exist.

use shared_types::Numeric;

use super::entities::{
    stage_names, LoanApplication, LoanId, LoanRequest, LoanStatus, Offer, OfferDraft, OfferId,
    Stage,
};

/// Rate applied when an application leaves the interest field blank.
pub const DEFAULT_INTEREST_RATE: f64 = 6.5;

/// Purpose recorded on loans spawned from a marketplace offer.
pub const OFFER_LOAN_PURPOSE: &str = "Applied from Loan Offer";

/// A fresh four-stage tracker with the submission stage completed today.
pub fn initial_stages(today: &str) -> Vec<Stage> {
    vec![
        Stage::completed_on(stage_names::SUBMITTED, today),
        Stage::pending(stage_names::UNDERWRITING),
        Stage::pending(stage_names::APPROVED),
        Stage::pending(stage_names::DISBURSED),
    ]
}

/// `round(amount / term)`; NaN in, NaN out.
pub fn monthly_instalment(amount: Numeric, term_months: Numeric) -> Numeric {
    (amount / term_months).round_half_up()
}

impl LoanRequest {
    /// Builds a `Pending` request from a direct application.
    pub fn from_application(
        id: LoanId,
        borrower_name: &str,
        application: &LoanApplication,
        today: &str,
    ) -> Self {
        let amount = Numeric::parse_float(&application.amount);
        let term_months = Numeric::parse_int(&application.term);
        let interest_rate = match application.interest.as_deref() {
            Some(rate) if !rate.is_empty() => Numeric::parse_float(rate),
            _ => Numeric::new(DEFAULT_INTEREST_RATE),
        };

        Self {
            id,
            borrower_name: borrower_name.to_string(),
            amount,
            purpose: application.purpose.clone(),
            status: LoanStatus::Pending,
            interest_rate,
            term_months,
            start_date: today.to_string(),
            next_payment_date: None,
            next_payment_amount: monthly_instalment(amount, term_months),
            approved_by_lender_name: None,
            stages: initial_stages(today),
        }
    }

    /// Builds a `Pending` request carrying an offer's terms, pre-assigned to
    /// the offering lender.
    pub fn from_offer(id: LoanId, borrower_name: &str, offer: &Offer, today: &str) -> Self {
        Self {
            id,
            borrower_name: borrower_name.to_string(),
            amount: offer.amount,
            purpose: OFFER_LOAN_PURPOSE.to_string(),
            status: LoanStatus::Pending,
            interest_rate: offer.interest_rate,
            term_months: offer.term_months,
            start_date: today.to_string(),
            next_payment_date: None,
            next_payment_amount: monthly_instalment(offer.amount, offer.term_months),
            approved_by_lender_name: Some(offer.lender_name.clone()),
            stages: initial_stages(today),
        }
    }

    /// `Pending → Active`. Marks `Approved` and `Disbursed` complete today.
    ///
    /// Returns `false` (and changes nothing) from any other status.
    pub fn approve(&mut self, lender_name: &str, today: &str) -> bool {
        if self.status != LoanStatus::Pending {
            return false;
        }
        self.status = LoanStatus::Active;
        self.approved_by_lender_name = Some(lender_name.to_string());
        for stage in &mut self.stages {
            if stage.name == stage_names::APPROVED || stage.name == stage_names::DISBURSED {
                stage.completed = true;
                stage.date = Some(today.to_string());
            }
        }
        true
    }

    /// `Pending → Rejected`.
    pub fn reject(&mut self, lender_name: &str) -> bool {
        if self.status != LoanStatus::Pending {
            return false;
        }
        self.status = LoanStatus::Rejected;
        self.approved_by_lender_name = Some(lender_name.to_string());
        true
    }

    /// `Active → Closed`.
    pub fn close(&mut self) -> bool {
        self.settle(LoanStatus::Closed)
    }

    /// `Active → Defaulted`.
    pub fn mark_defaulted(&mut self) -> bool {
        self.settle(LoanStatus::Defaulted)
    }

    fn settle(&mut self, outcome: LoanStatus) -> bool {
        if self.status != LoanStatus::Active {
            return false;
        }
        self.status = outcome;
        true
    }
}

impl Offer {
    pub fn from_draft(id: OfferId, lender_name: &str, draft: &OfferDraft) -> Self {
        Self {
            id,
            amount: Numeric::parse_float(&draft.amount),
            interest_rate: Numeric::parse_float(&draft.interest),
            term_months: Numeric::parse_int(&draft.term),
            description: draft.description.clone(),
            optional_terms: draft.optional_terms.clone(),
            lender_name: lender_name.to_string(),
        }
    }
}
