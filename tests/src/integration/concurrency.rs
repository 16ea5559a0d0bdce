//! # Concurrency Tests
//!
//! Competing transactions on the same record. Every transaction that read a
//! key validates the version it saw at commit; at most one writer wins.

#[cfg(test)]
mod tests {
    use crate::fixtures::{decode, Fixture, BASE_SECONDS, MFG_ORG};
    use custody_lifecycle::prelude::*;
    use custody_node::{DevHost, HostRequest};
    use parking_lot::Mutex;
    use std::sync::{Arc, Barrier};

    #[test]
    fn test_second_transition_commit_conflicts() {
        let mut fx = Fixture::default();
        let id = fx.create_car("CH001");

        let mut first = fx.begin();
        let mut second = fx.begin();
        fx.invoke_in(&mut first, "deliverToDealer", &[&id, "D1", "A1", "DEALER"])
            .unwrap();
        fx.invoke_in(&mut second, "deliverToDealer", &[&id, "D2", "A2", "DEALER"])
            .unwrap();

        first.commit().unwrap();
        assert_eq!(
            second.commit().unwrap_err(),
            LedgerError::MvccReadConflict { key: id.clone() }
        );

        let stored = decode(&fx.ledger.snapshot(&id).unwrap());
        assert_eq!(stored.payload.dealer, "D1");
        assert_eq!(stored.revision, 2);
    }

    #[test]
    fn test_concurrent_creates_of_same_id_conflict() {
        let fx = Fixture::default();
        let ts = TxTimestamp::new(BASE_SECONDS, 0);
        let mut first = fx.ledger.begin("tx-a", ts);
        let mut second = fx.ledger.begin("tx-b", ts);
        let create = ["CH001", "ACME", "Springfield", "MANUFACTURER"];

        let a = fx.invoke_in(&mut first, "createCar", &create).unwrap();
        let b = fx.invoke_in(&mut second, "createCar", &create).unwrap();
        assert_eq!(a, b);

        first.commit().unwrap();
        assert!(matches!(
            second.commit(),
            Err(LedgerError::MvccReadConflict { .. })
        ));
        assert_eq!(fx.ledger.len(), 1);
    }

    #[test]
    fn test_delete_invalidates_pending_transition() {
        let mut fx = Fixture::default();
        let id = fx.create_car("CH001");

        let mut transition = fx.begin();
        let mut delete = fx.begin();
        fx.invoke_in(&mut transition, "deliverToDealer", &[&id, "D", "A", "DEALER"])
            .unwrap();
        fx.invoke_in(&mut delete, "del", &[&id]).unwrap();

        delete.commit().unwrap();
        assert!(transition.commit().is_err());
        assert!(fx.ledger.snapshot(&id).is_none());
    }

    #[test]
    fn test_racing_deliveries_have_one_winner() {
        const RACERS: usize = 8;

        let mut fx = Fixture::default();
        let id = fx.create_car("CH001");
        let txs: Vec<LedgerTransaction> = (0..RACERS).map(|_| fx.begin()).collect();

        let barrier = Barrier::new(RACERS);
        let winners = Mutex::new(Vec::new());
        let fx = &fx;

        std::thread::scope(|scope| {
            for (i, mut tx) in txs.into_iter().enumerate() {
                let barrier = &barrier;
                let winners = &winners;
                let id = id.as_str();
                scope.spawn(move || {
                    let dealer = format!("dealer-{i}");
                    barrier.wait();
                    let invoked =
                        fx.invoke_in(&mut tx, "deliverToDealer", &[id, &dealer, "A", "DEALER"]);
                    match invoked {
                        Ok(_) => {
                            if tx.commit().is_ok() {
                                winners.lock().push(dealer);
                            }
                        }
                        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidTransition),
                    }
                });
            }
        });

        let winners = winners.into_inner();
        assert_eq!(winners.len(), 1);
        let stored = decode(&fx.ledger.snapshot(&id).unwrap());
        assert_eq!(stored.payload.dealer, winners[0]);
        assert_eq!(stored.revision, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_host_serves_concurrent_requests() {
        const CARS: usize = 32;

        let host = Arc::new(DevHost::new(CustodyConfig::default()).unwrap());
        let mut handles = Vec::with_capacity(CARS);
        for i in 0..CARS {
            let host = Arc::clone(&host);
            handles.push(tokio::spawn(async move {
                host.execute(&HostRequest {
                    function: "createCar".to_string(),
                    args: vec![
                        format!("CH{i:03}"),
                        "ACME".to_string(),
                        "Springfield".to_string(),
                        "MANUFACTURER".to_string(),
                    ],
                    org: Some(MFG_ORG.to_string()),
                })
            }));
        }

        for handle in handles {
            let response = handle.await.unwrap();
            assert!(response.is_ok(), "{response:?}");
        }
        assert_eq!(host.ledger().len(), CARS);
        assert_eq!(host.stats().committed, CARS as u64);
    }
}
