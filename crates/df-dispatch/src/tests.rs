//! Unit tests for df-dispatch.

#[cfg(test)]
fn req(n: u128, priority: df_queue::Priority, weight: f64) -> df_queue::Request {
    use df_core::{GeoPoint, RequestId, Tick};
    df_queue::Request {
        id:            RequestId::from_u128(n),
        address:       format!("Rua {n}, s/n"),
        neighbourhood: None,
        destination:   GeoPoint::new(-19.93, -43.94),
        weight,
        priority,
        status:        df_queue::RequestStatus::Waiting,
        created_at:    Tick(n as u64),
    }
}

#[cfg(test)]
fn fleet(n: usize) -> df_fleet::Fleet {
    let signs: Vec<String> = (0..n).map(|i| format!("D{i}")).collect();
    df_fleet::FleetBuilder::new(12.0, df_core::GeoPoint::new(-19.9208, -43.9378))
        .vehicles(signs)
        .build()
}

#[cfg(test)]
mod head_policy {
    use df_queue::{Priority, RequestStatus};

    use super::req;
    use crate::{AllocationPolicy, BatchLimits, HeadOfQueuePolicy};

    const LIMITS: BatchLimits = BatchLimits { capacity: 12.0, max_size: 3 };

    #[test]
    fn empty_queue_yields_nothing() {
        assert!(HeadOfQueuePolicy.select_batch(&[], &LIMITS).is_none());
    }

    #[test]
    fn three_fours_fill_exactly() {
        let q = [req(1, Priority::High, 4.0), req(2, Priority::High, 4.0), req(3, Priority::High, 4.0)];
        let b = HeadOfQueuePolicy.select_batch(&q, &LIMITS).unwrap();
        assert_eq!(b.positions, vec![0, 1, 2]);
        assert_eq!(b.weight, 12.0);
    }

    #[test]
    fn skips_candidates_that_do_not_fit() {
        let q = [
            req(1, Priority::High, 7.0),
            req(2, Priority::High, 6.0),
            req(3, Priority::High, 5.0),
            req(4, Priority::High, 1.0),
        ];
        let b = HeadOfQueuePolicy.select_batch(&q, &LIMITS).unwrap();
        assert_eq!(b.positions, vec![0, 2]);
        assert_eq!(b.weight, 12.0);
    }

    #[test]
    fn batch_size_capped_at_three() {
        let q: Vec<_> = (1..=6).map(|n| req(n, Priority::Low, 1.0)).collect();
        let b = HeadOfQueuePolicy.select_batch(&q, &LIMITS).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(b.weight, 3.0);
    }

    #[test]
    fn claimed_head_blocks() {
        let mut q = vec![req(1, Priority::High, 2.0), req(2, Priority::High, 2.0)];
        q[0].status = RequestStatus::Staging;
        assert!(HeadOfQueuePolicy.select_batch(&q, &LIMITS).is_none());
    }

    #[test]
    fn oversized_head_blocks_lighter_requests() {
        let q = [req(1, Priority::High, 9.0), req(2, Priority::Low, 1.0)];
        let small = BatchLimits { capacity: 8.0, max_size: 3 };
        assert!(HeadOfQueuePolicy.select_batch(&q, &small).is_none());
    }

    #[test]
    fn claimed_candidates_are_skipped() {
        let mut q = vec![req(1, Priority::High, 2.0), req(2, Priority::High, 2.0), req(3, Priority::High, 2.0)];
        q[1].status = RequestStatus::Loading;
        let b = HeadOfQueuePolicy.select_batch(&q, &LIMITS).unwrap();
        assert_eq!(b.positions, vec![0, 2]);
    }
}

#[cfg(test)]
mod skip_ahead_policy {
    use df_core::AllocationStrategy;
    use df_queue::{Priority, RequestStatus};

    use super::req;
    use crate::{AllocationPolicy, BatchLimits, SkipAheadPolicy, policy_for};

    #[test]
    fn seeds_past_oversized_head() {
        let q = [req(1, Priority::High, 9.0), req(2, Priority::Low, 1.0), req(3, Priority::Low, 2.0)];
        let small = BatchLimits { capacity: 8.0, max_size: 3 };
        let b = SkipAheadPolicy.select_batch(&q, &small).unwrap();
        assert_eq!(b.positions, vec![1, 2]);
    }

    #[test]
    fn seeds_past_claimed_head() {
        let mut q = vec![req(1, Priority::High, 2.0), req(2, Priority::High, 2.0)];
        q[0].status = RequestStatus::InTransit;
        let limits = BatchLimits { capacity: 12.0, max_size: 3 };
        let b = SkipAheadPolicy.select_batch(&q, &limits).unwrap();
        assert_eq!(b.positions, vec![1]);
    }

    #[test]
    fn config_selects_policy() {
        assert_eq!(policy_for(AllocationStrategy::HeadOfQueue).name(), "head_of_queue");
        assert_eq!(policy_for(AllocationStrategy::SkipAhead).name(), "skip_ahead");
    }
}

#[cfg(test)]
mod dispatcher {
    use df_core::{RequestId, VehicleId};
    use df_fleet::Phase;
    use df_queue::{Priority, RequestQueue, RequestStatus};

    use super::{fleet, req};
    use crate::{Dispatcher, HeadOfQueuePolicy, SkipAheadPolicy};

    #[test]
    fn single_vehicle_takes_three_fours() {
        let mut f = fleet(1);
        let mut q = RequestQueue::new();
        for n in 1..=3 {
            q.push(req(n, Priority::High, 4.0));
        }
        let out = Dispatcher::new(HeadOfQueuePolicy, 3, 20.0).dispatch(&mut f, &mut q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].requests.len(), 3);

        let v = f.get(VehicleId(0)).unwrap();
        assert_eq!(v.phase, Phase::Staging);
        assert_eq!(v.manifest.len(), 3);
        assert_eq!(v.current_load, 12.0);
        assert!(q.iter().all(|r| r.status == RequestStatus::Staging));
    }

    #[test]
    fn sorts_queue_before_allocating() {
        let mut f = fleet(1);
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::Low, 10.0));
        q.push(req(2, Priority::High, 10.0));
        let out = Dispatcher::new(HeadOfQueuePolicy, 3, 20.0).dispatch(&mut f, &mut q);
        assert_eq!(out[0].requests, vec![RequestId::from_u128(2)]);
        assert!(q.is_sorted_by_priority());
        assert_eq!(q.head().unwrap().id, RequestId::from_u128(2));
    }

    #[test]
    fn claimed_head_leaves_second_vehicle_idle() {
        let mut f = fleet(2);
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::High, 10.0));
        q.push(req(2, Priority::High, 10.0));
        let out = Dispatcher::new(HeadOfQueuePolicy, 3, 20.0).dispatch(&mut f, &mut q);
        assert_eq!(out.len(), 1);
        assert_eq!(f.get(VehicleId(1)).unwrap().phase, Phase::Idle);
    }

    #[test]
    fn skip_ahead_feeds_second_vehicle() {
        let mut f = fleet(2);
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::High, 10.0));
        q.push(req(2, Priority::High, 10.0));
        let out = Dispatcher::new(SkipAheadPolicy, 3, 20.0).dispatch(&mut f, &mut q);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].requests, vec![RequestId::from_u128(2)]);
    }

    #[test]
    fn low_battery_vehicle_not_dispatched() {
        let mut f = fleet(1);
        f.get_mut(VehicleId(0)).unwrap().battery = 20.0;
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::High, 1.0));
        let out = Dispatcher::new(HeadOfQueuePolicy, 3, 20.0).dispatch(&mut f, &mut q);
        assert!(out.is_empty());
        assert_eq!(q.head().unwrap().status, RequestStatus::Waiting);
    }
}

#[cfg(test)]
mod dispatch_props {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use df_queue::{Priority, RequestQueue, RequestStatus};

    use super::{fleet, req};
    use crate::{AllocationPolicy, Dispatcher, HeadOfQueuePolicy, SkipAheadPolicy};

    fn priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
    }

    fn check<P: AllocationPolicy>(policy: P, jobs: &[(Priority, f64)], vehicles: usize) -> Result<(), TestCaseError> {
        let mut f = fleet(vehicles);
        let mut q = RequestQueue::new();
        for (i, (p, w)) in jobs.iter().enumerate() {
            q.push(req(i as u128, *p, *w));
        }
        let out = Dispatcher::new(policy, 3, 20.0).dispatch(&mut f, &mut q);

        prop_assert!(q.is_sorted_by_priority());
        let mut seen = HashSet::new();
        for a in &out {
            for id in &a.requests {
                prop_assert!(seen.insert(*id), "request {id} claimed twice");
                prop_assert_eq!(q.get(*id).unwrap().status, RequestStatus::Staging);
            }
        }
        for v in &f {
            prop_assert!(v.manifest.len() <= 3);
            prop_assert!(v.current_load <= v.max_capacity + 1e-9);
            prop_assert!((v.manifest_weight() - v.current_load).abs() < 1e-9);
            prop_assert!(v.check_invariants(3).is_ok());
        }
        prop_assert_eq!(q.waiting_count() + seen.len(), q.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn head_policy_respects_limits(
            jobs in prop::collection::vec((priority(), 0.1f64..12.0), 0..20),
            vehicles in 1usize..6,
        ) {
            check(HeadOfQueuePolicy, &jobs, vehicles)?;
        }

        #[test]
        fn skip_ahead_respects_limits(
            jobs in prop::collection::vec((priority(), 0.1f64..12.0), 0..20),
            vehicles in 1usize..6,
        ) {
            check(SkipAheadPolicy, &jobs, vehicles)?;
        }
    }
}
