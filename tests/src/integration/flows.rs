//! # Integration Test Flows
//!
//! Role-by-role journeys through the identity store and the domain store
//! sharing one key-value store.
//!
//! ## Flows Tested:
//!
//! 1. **Borrower lifecycle**: register → login → apply → approval → repayment
//! 2. **Marketplace**: lender publishes, borrower applies, lender withdraws
//! 3. **Administration**: block, role change, removal, and their effect on sessions
//! 4. **Analyst overview**: portfolio figures follow the mutations above
//! 5. **Restart**: session and collections survive a file-backed restart

#[cfg(test)]
mod tests {
    use ls_01_identity::{AuthError, IdentityApi, SessionState};
    use ls_02_domain_store::{
        DomainStoreApi, LoanApplication, LoanStatus, NotificationKind, OfferDraft, OfferId,
        StoreConfig, TransactionKind,
    };
    use loansphere_runtime::{CoreContainer, RuntimeConfig, StorageBackend};
    use shared_types::{AccountId, AccountStatus, ProfileUpdate, Role};

    use crate::integration::fixtures::*;

    // =========================================================================
    // BORROWER LIFECYCLE
    // =========================================================================

    #[test]
    fn test_borrower_application_to_repayment() {
        let mut core = Core::seeded();
        core.identity
            .register("Nina Patel", "nina@example.com", "s3cret", "borrower")
            .unwrap();
        let nina = core.identity.login("nina@example.com", "s3cret").unwrap();
        assert_eq!(nina.role, Role::Borrower);

        let loan_id = core.store.write().apply_for_loan(
            &nina,
            &LoanApplication::new("6000", "Studio equipment", "12").with_interest("7.25"),
        );
        {
            let store = core.store.read();
            let mine = store.visible_loans(&nina);
            assert_eq!(mine.len(), 1);
            assert_eq!(mine[0].next_payment_amount.value(), 500.0);
            assert!(store.review_queue().iter().any(|l| l.id == loan_id));
        }

        let lender = core.principal(LENDER_EMAIL);
        core.store.write().approve_loan(&lender, loan_id).unwrap();
        assert!(core
            .store
            .read()
            .visible_loans(&lender)
            .iter()
            .any(|l| l.id == loan_id));

        for _ in 0..12 {
            core.store.write().add_payment(&nina, "500", Some(loan_id));
        }

        let store = core.store.read();
        let ledger = store.loan_ledger(loan_id).unwrap();
        assert_eq!(ledger.payment_count, 12);
        assert_eq!(ledger.amount_paid.value(), 6000.0);
        assert_eq!(ledger.remaining_balance.value(), 0.0);
        assert_eq!(ledger.display_status, LoanStatus::Closed);

        let visible = store.visible_transactions(&nina);
        assert_eq!(visible.len(), 12);
        assert!(visible.iter().all(|t| t.kind == TransactionKind::Payment));
        // The lender sees payments from borrowers of their loans
        assert!(store.visible_transactions(&lender).len() >= 12);
    }

    #[test]
    fn test_rejected_application_is_final() {
        let mut core = Core::seeded();
        let borrower = core.login_seeded(BORROWER_EMAIL);
        let lender = core.principal(LENDER_EMAIL);
        let loan_id = core
            .store
            .write()
            .apply_for_loan(&borrower, &LoanApplication::new("800", "Phone", "4"));

        core.store.write().reject_loan_application(&lender, loan_id).unwrap();

        assert!(core.store.write().approve_loan(&lender, loan_id).is_none());
        assert_eq!(
            core.store.read().loan(loan_id).unwrap().status,
            LoanStatus::Rejected
        );
    }

    // =========================================================================
    // MARKETPLACE
    // =========================================================================

    #[test]
    fn test_marketplace_publish_apply_withdraw() {
        let mut core = Core::seeded();
        let lender = core.login_seeded(LENDER_EMAIL);
        let borrower = core.principal(BORROWER_EMAIL);

        let fresh = core.store.write().create_offer(
            &lender,
            &OfferDraft::new("40000", "5.0", "24").with_optional_terms("No prepayment fee"),
        );
        {
            let store = core.store.read();
            // Lenders see their own offers, borrowers see the whole market
            assert!(store.visible_offers(&lender).iter().all(|o| o.lender_name == "John Lender"));
            assert_eq!(store.visible_offers(&borrower).len(), 4);
        }

        let loan_id = core.store.write().apply_for_offer(&borrower, fresh).unwrap();
        assert_eq!(
            core.store.read().loan(loan_id).unwrap().approved_by_lender_name.as_deref(),
            Some("John Lender")
        );

        assert!(core.store.write().delete_offer(&lender, OfferId(1)).is_some());
        assert!(core.store.write().delete_offer(&lender, OfferId(3)).is_none());

        let store = core.store.read();
        let offers: Vec<OfferId> = store.offers().iter().map(|o| o.id).collect();
        assert_eq!(offers, vec![OfferId(2), OfferId(3)]);
        assert_eq!(store.activity_log()[0].action, "Offer Withdrawn");
    }

    #[test]
    fn test_stale_offer_application_is_logged_not_announced() {
        let mut core = Core::seeded();
        let borrower = core.principal(BORROWER_EMAIL);
        let lender = core.principal(LENDER_EMAIL);
        core.store.write().delete_offer(&lender, OfferId(1));
        let notifications = core.store.read().notifications().len();

        assert!(core.store.write().apply_for_offer(&borrower, OfferId(1)).is_none());

        let store = core.store.read();
        assert_eq!(store.activity_log()[0].action, "Offer Unavailable");
        assert_eq!(store.notifications().len(), notifications);
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    #[test]
    fn test_admin_blocks_and_unblocks_user() {
        let mut core = Core::seeded();
        let admin = core.login_seeded(ADMIN_EMAIL);
        core.identity.logout();

        assert_eq!(
            core.store.write().toggle_block(&admin, AccountId(2)),
            Some(AccountStatus::Blocked)
        );
        assert_eq!(
            core.identity.login(LENDER_EMAIL, ls_02_domain_store::SEED_PASSWORD),
            Err(AuthError::AccountBlocked)
        );

        core.store.write().toggle_block(&admin, AccountId(2));
        assert!(core.identity.login(LENDER_EMAIL, ls_02_domain_store::SEED_PASSWORD).is_ok());

        let store = core.store.read();
        let kinds: Vec<NotificationKind> = store.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Warning, NotificationKind::Warning]);
        assert_eq!(store.unread_notification_count(), 2);
    }

    #[test]
    fn test_role_change_reaches_live_session() {
        let mut core = Core::seeded();
        core.login_seeded(BORROWER_EMAIL);
        let admin = core.principal(ADMIN_EMAIL);

        core.store.write().edit_role(&admin, AccountId(3), "lender");
        assert_eq!(core.identity.current_principal().unwrap().role, Role::Lender);

        assert!(core.store.write().edit_role(&admin, AccountId(3), "owner").is_none());
        assert_eq!(core.identity.current_principal().unwrap().role, Role::Lender);
    }

    #[test]
    fn test_removed_account_loses_session_on_restart() {
        let mut core = Core::seeded();
        core.login_seeded(ANALYST_EMAIL);
        let admin = core.principal(ADMIN_EMAIL);
        core.store.write().remove_account(&admin, AccountId(4));

        assert!(core.identity.current_principal().is_none());

        let restarted = Core::over(core.kv.clone(), StoreConfig::default());
        assert_eq!(restarted.identity.session_state(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_admin_visibility_by_role() {
        let core = Core::seeded();
        let store = core.store.read();

        assert_eq!(store.visible_accounts(&core.principal(ADMIN_EMAIL)).len(), 4);
        assert_eq!(store.visible_accounts(&core.principal(ANALYST_EMAIL)).len(), 4);
        let for_lender = store.visible_accounts(&core.principal(LENDER_EMAIL));
        assert!(for_lender.iter().all(|a| a.role == Role::Borrower));
        assert!(store.visible_accounts(&core.principal(BORROWER_EMAIL)).is_empty());
    }

    #[test]
    fn test_profile_update_keeps_one_copy() {
        let mut core = Core::seeded();
        core.login_seeded(LENDER_EMAIL);

        let principal = core
            .identity
            .update_profile(&ProfileUpdate {
                name: Some("John Q. Lender".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(principal.name, "John Q. Lender");
        assert_eq!(
            core.store.read().account(AccountId(2)).unwrap().name,
            "John Q. Lender"
        );
        // totalCapital survives the merge
        assert_eq!(principal.extra["totalCapital"], serde_json::json!(500000));
    }

    // =========================================================================
    // ANALYST OVERVIEW
    // =========================================================================

    #[test]
    fn test_portfolio_figures_follow_mutations() {
        let mut core = Core::seeded();
        let admin = core.principal(ADMIN_EMAIL);
        let lender = core.principal(LENDER_EMAIL);
        let borrower = core.principal(BORROWER_EMAIL);
        let before = core.store.read().portfolio_summary();

        core.store.write().add_payment(&borrower, "1000", Some(ls_02_domain_store::LoanId(101)));
        core.store.write().approve_loan(&lender, ls_02_domain_store::LoanId(102));
        core.store
            .write()
            .mark_loan_defaulted(&admin, ls_02_domain_store::LoanId(102));

        let store = core.store.read();
        let after = store.portfolio_summary();
        assert_eq!(after.total_repaid.value(), before.total_repaid.value() + 1000.0);
        assert_eq!(after.default_losses.value(), 25000.0);
        assert_eq!(after.status_distribution[&LoanStatus::Defaulted], 1);

        let risk = store.risk_assessment();
        assert_eq!(risk.defaulted_loans, 1);
        assert!(risk.risk_score >= 15);

        let overview = store.admin_overview();
        assert_eq!(overview.account_count, 4);
        assert_eq!(overview.pending_review, 1);
    }

    // =========================================================================
    // RESTART
    // =========================================================================

    #[test]
    fn test_runtime_restart_keeps_session_and_loans() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            data_dir: dir.path().to_path_buf(),
            storage: StorageBackend::File,
            ..Default::default()
        };

        let loan_id = {
            let core = CoreContainer::new(config.clone());
            let lender = core
                .identity
                .write()
                .login(LENDER_EMAIL, ls_02_domain_store::SEED_PASSWORD)
                .unwrap();
            let approved = core
                .domain
                .write()
                .approve_loan(&lender, ls_02_domain_store::LoanId(104))
                .unwrap()
                .id;
            approved
        };

        let core = CoreContainer::new(config);
        assert_eq!(core.current_principal().unwrap().name, "John Lender");
        assert_eq!(
            core.domain.read().loan(loan_id).unwrap().status,
            LoanStatus::Active
        );
        assert_eq!(core.summary().persist_failures, 0);
    }
}
