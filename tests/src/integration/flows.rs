//! # Integration Test Flows
//!
//! End-to-end custody lifecycle through `custody-lifecycle` and the
//! `custody-node` development host.
//!
//! ## Flows Tested:
//!
//! 1. **Full lifecycle**: create → deliver → sell, then a rejected re-delivery
//! 2. **Authorization**: rejected invocations leave the ledger untouched
//! 3. **Empty arguments**: blank parties rejected, the record stays usable
//! 4. **Deletion**: `del` is idempotent and removes the record
//! 5. **Org identity**: role claims bound to the invoker's organization when enforced
//! 6. **Host wire format**: JSON lines in, JSON responses out

#[cfg(test)]
mod tests {
    use crate::fixtures::{decode, Fixture, DEALER_ORG, MFG_ORG};
    use custody_lifecycle::prelude::*;
    use custody_node::{DevHost, NodeConfig};
    use serde_json::Value;

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[test]
    fn test_full_lifecycle_scenario() {
        let mut fx = Fixture::default();

        let created = decode(
            &fx.invoke("createCar", &["CH001", "ACME", "Springfield", "MANUFACTURER"])
                .unwrap(),
        );
        let id = created.payload.id.to_string();
        assert_eq!(created.payload.status, AssetStatus::Created);
        assert_eq!(id.len(), 62);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(
            id,
            derive_id_from_text("CH001", "ACME", &created.payload.recorded_at).to_string()
        );

        let delivered = decode(
            &fx.invoke("deliverToDealer", &[&id, "BestDealer", "Metropolis", "DEALER"])
                .unwrap(),
        );
        assert_eq!(delivered.payload.status, AssetStatus::ReadyForSale);
        assert_eq!(delivered.payload.dealer, "BestDealer");
        assert_eq!(delivered.payload.address, "Metropolis");

        let sold = decode(
            &fx.invoke("saleToCustomer", &[&id, "Jane", "Gotham", "DEALER"])
                .unwrap(),
        );
        assert_eq!(sold.payload.status, AssetStatus::Sold);
        assert_eq!(sold.payload.dealer, "BestDealer");
        assert_eq!(sold.payload.customer, "Jane");
        assert_eq!(sold.payload.chassis_number, "CH001");
        assert_eq!(sold.payload.manufacturer, "ACME");
        assert_eq!(sold.revision, 3);

        let err = fx
            .invoke("deliverToDealer", &[&id, "X", "Y", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);

        let stored = decode(&fx.invoke("queryRecord", &[&id]).unwrap());
        assert_eq!(stored, sold);
    }

    #[test]
    fn test_same_chassis_at_different_times_gets_distinct_ids() {
        let mut fx = Fixture::default();
        let first = fx.create_car("CH001");
        let second = fx.create_car("CH001");
        assert_ne!(first, second);
        assert_eq!(fx.ledger.len(), 2);
    }

    #[test]
    fn test_query_unknown_id() {
        let mut fx = Fixture::default();
        let err = fx.invoke("queryRecord", &["unknown-id"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =============================================================================
    // AUTHORIZATION
    // =============================================================================

    #[test]
    fn test_rejected_invocations_do_not_mutate() {
        let mut fx = Fixture::default();

        let err = fx
            .invoke("createCar", &["CH001", "ACME", "Springfield", "CUSTOMER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(fx.ledger.is_empty());

        let id = fx.create_car("CH001");
        let before = fx.ledger.snapshot(&id);
        let version = fx.ledger.version(&id);

        for (function, role) in [
            ("deliverToDealer", "MANUFACTURER"),
            ("deliverToDealer", "CUSTOMER"),
            ("saleToCustomer", "CUSTOMER"),
        ] {
            let err = fx.invoke(function, &[&id, "P", "A", role]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization, "{function} as {role}");
        }
        let err = fx
            .invoke("saleToCustomer", &[&id, "Jane", "Gotham", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);

        assert_eq!(fx.ledger.snapshot(&id), before);
        assert_eq!(fx.ledger.version(&id), version);
    }

    #[test]
    fn test_authorization_checked_before_existence() {
        let mut fx = Fixture::default();
        let err = fx
            .invoke("deliverToDealer", &["missing", "D", "A", "CUSTOMER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let err = fx
            .invoke("deliverToDealer", &["missing", "D", "A", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_empty_arguments_on_transitions() {
        let mut fx = Fixture::default();
        let id = fx.create_car("CH001");

        for party in ["", " "] {
            let err = fx
                .invoke("deliverToDealer", &[&id, party, "Metropolis", "DEALER"])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(fx.ledger.version(&id), 1);
        let stored = decode(&fx.ledger.snapshot(&id).unwrap());
        assert_eq!(stored.payload.status, AssetStatus::Created);

        // The record stays usable after a rejected delivery.
        fx.invoke("deliverToDealer", &[&id, "BestDealer", "", "DEALER"]).unwrap();
        let err = fx
            .invoke("saleToCustomer", &[&id, "", "Gotham", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let sold = decode(
            &fx.invoke("saleToCustomer", &[&id, "Jane", "Gotham", "DEALER"])
                .unwrap(),
        );
        assert_eq!(sold.payload.dealer, "BestDealer");
        assert_eq!(sold.payload.customer, "Jane");

        let err = fx
            .invoke("deliverToDealer", &["", "D", "A", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =============================================================================
    // DELETION
    // =============================================================================

    #[test]
    fn test_delete_is_idempotent() {
        let mut fx = Fixture::default();
        assert!(fx.invoke("del", &["never-existed"]).unwrap().is_empty());
        assert!(fx.invoke("del", &[""]).unwrap().is_empty());
        assert_eq!(
            fx.invoke("queryRecord", &[""]).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        let id = fx.create_car("CH001");
        fx.invoke("deliverToDealer", &[&id, "D", "A", "DEALER"]).unwrap();
        fx.invoke("del", &[&id]).unwrap();
        fx.invoke("del", &[&id]).unwrap();

        assert_eq!(
            fx.invoke("queryRecord", &[&id]).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            fx.invoke("saleToCustomer", &[&id, "C", "B", "DEALER"])
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert!(fx.ledger.is_empty());
    }

    // =============================================================================
    // ORG IDENTITY
    // =============================================================================

    #[test]
    fn test_org_identity_enforcement() {
        let mut fx = Fixture::with_config(CustodyConfig {
            enforce_org_identity: true,
            ..CustodyConfig::default()
        });

        fx.act_as(DEALER_ORG);
        let err = fx
            .invoke("createCar", &["CH001", "ACME", "Springfield", "MANUFACTURER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(fx.ledger.is_empty());

        fx.act_as(MFG_ORG);
        let id = fx.create_car("CH001");

        let err = fx
            .invoke("deliverToDealer", &[&id, "D", "A", "DEALER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        fx.act_as(DEALER_ORG);
        fx.invoke("deliverToDealer", &[&id, "D", "A", "DEALER"]).unwrap();
        fx.invoke("saleToCustomer", &[&id, "C", "B", "DEALER"]).unwrap();

        // Queries and deletes carry no role requirement.
        fx.act_as("unrelated-org");
        fx.invoke("queryRecord", &[&id]).unwrap();
        fx.invoke("del", &[&id]).unwrap();
    }

    #[test]
    fn test_unresolvable_invoker_blocks_mutations() {
        let mut fx = Fixture::default();
        fx.identity = StaticIdentity::unresolvable();
        let err = fx
            .invoke("createCar", &["CH001", "ACME", "Springfield", "MANUFACTURER"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(fx.ledger.is_empty());
    }

    // =============================================================================
    // DEVELOPMENT HOST
    // =============================================================================

    #[test]
    fn test_host_lines_round_trip() {
        let (config, ignored) = NodeConfig::from_lookup(|key| match key {
            "CUSTODY_ENFORCE_ORG" => Some("true".to_string()),
            "RUST_LOG" => Some("custody_lifecycle=debug".to_string()),
            _ => None,
        });
        assert!(ignored.is_empty());
        assert_eq!(config.log_filter, "custody_lifecycle=debug");
        config.validate().unwrap();
        let host = DevHost::new(config.custody).unwrap();

        let created = host.execute_line(
            r#"{"function":"createCar","args":["CH001","ACME","Springfield","MANUFACTURER"]}"#,
        );
        assert!(created.is_ok(), "{created:?}");
        let record: Value = serde_json::from_str(&created.payload).unwrap();
        let id = record["id"].as_str().unwrap().to_string();

        let delivered = host.execute_line(&format!(
            r#"{{"function":"deliverToDealer","args":["{id}","BestDealer","Metropolis","DEALER"],"org":"dealer-instance"}}"#
        ));
        let record: Value = serde_json::from_str(&delivered.payload).unwrap();
        assert_eq!(record["status"], "READY_FOR_SALE");
        assert_eq!(record["revision"], 2);

        let missing = host.execute_line(r#"{"function":"queryRecord","args":["unknown-id"]}"#);
        let encoded = serde_json::to_value(&missing).unwrap();
        assert_eq!(encoded["status"], "ERROR");
        assert_eq!(encoded["errorKind"], "NotFoundError");

        let unknown = host.execute_line(r#"{"function":"repaint","args":[]}"#);
        assert_eq!(unknown.error_kind.as_deref(), Some("UnknownOperationError"));

        let stats = host.stats();
        assert_eq!(stats.requests, 4);
        assert_eq!(stats.committed, 2);
        assert_eq!(stats.failed, 2);
    }
}
