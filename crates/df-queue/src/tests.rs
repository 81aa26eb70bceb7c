//! Unit tests for df-queue.

#[cfg(test)]
fn req(n: u128, priority: crate::Priority, weight: f64) -> crate::Request {
    use df_core::{GeoPoint, RequestId, Tick};
    crate::Request {
        id:            RequestId::from_u128(n),
        address:       format!("Rua {n}, s/n"),
        neighbourhood: None,
        destination:   GeoPoint::new(-19.92, -43.94),
        weight,
        priority,
        status:        crate::RequestStatus::Waiting,
        created_at:    Tick(n as u64),
    }
}

#[cfg(test)]
mod intake {
    use df_core::{GeoPoint, RequestId, Tick};

    use crate::{IntakeError, Priority, RequestDraft, RequestStatus};

    fn draft(weight: f64) -> RequestDraft {
        RequestDraft::new("Rua da Bahia", GeoPoint::new(-19.9191, -43.9386), weight, Priority::High)
    }

    #[test]
    fn accepted_draft_becomes_waiting_request() {
        let r = draft(5.0)
            .number("1148")
            .neighbourhood("Centro")
            .into_request(RequestId::from_u128(1), Tick(7), 12.0)
            .unwrap();
        assert_eq!(r.status, RequestStatus::Waiting);
        assert_eq!(r.created_at, Tick(7));
        assert_eq!(r.address, "Rua da Bahia, 1148");
        assert_eq!(r.neighbourhood.as_deref(), Some("Centro"));
    }

    #[test]
    fn missing_number_formats_as_sn() {
        let r = draft(1.0).into_request(RequestId::from_u128(1), Tick(0), 12.0).unwrap();
        assert_eq!(r.address, "Rua da Bahia, s/n");
    }

    #[test]
    fn exactly_capacity_is_accepted() {
        assert!(draft(12.0).validate(12.0).is_ok());
    }

    #[test]
    fn over_capacity_rejected() {
        assert_eq!(
            draft(15.0).validate(12.0),
            Err(IntakeError::CapacityExceeded { weight: 15.0, max: 12.0 })
        );
    }

    #[test]
    fn capacity_checked_before_missing_fields() {
        let mut d = draft(15.0);
        d.street = None;
        assert!(matches!(d.validate(12.0), Err(IntakeError::CapacityExceeded { .. })));
    }

    #[test]
    fn missing_address_rejected() {
        let mut d = draft(1.0);
        d.street = Some("   ".into());
        assert_eq!(d.validate(12.0), Err(IntakeError::MissingField("address")));
    }

    #[test]
    fn missing_destination_rejected() {
        let mut d = draft(1.0);
        d.destination = None;
        assert_eq!(d.validate(12.0), Err(IntakeError::MissingField("destination")));
    }

    #[test]
    fn non_positive_weight_rejected() {
        assert_eq!(draft(0.0).validate(12.0), Err(IntakeError::InvalidWeight(0.0)));
        assert!(matches!(draft(f64::NAN).validate(12.0), Err(IntakeError::InvalidWeight(_))));
    }
}

#[cfg(test)]
mod priority {
    use crate::Priority;

    #[test]
    fn rank_order() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }
}

#[cfg(test)]
mod queue {
    use df_core::RequestId;

    use super::req;
    use crate::{Priority, RequestQueue, RequestStatus};

    #[test]
    fn sort_orders_high_medium_low() {
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::Low, 1.0));
        q.push(req(2, Priority::High, 1.0));
        q.push(req(3, Priority::Medium, 1.0));
        q.sort_by_priority();
        let order: Vec<_> = q.iter().map(|r| r.priority).collect();
        assert_eq!(order, [Priority::High, Priority::Medium, Priority::Low]);
        assert!(q.is_sorted_by_priority());
    }

    #[test]
    fn sort_is_stable_for_equal_priority() {
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::Low, 1.0));
        q.push(req(2, Priority::High, 1.0));
        q.push(req(3, Priority::Low, 1.0));
        q.push(req(4, Priority::High, 1.0));
        q.sort_by_priority();
        let ids: Vec<_> = q.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            [2, 4, 1, 3].map(RequestId::from_u128),
        );
    }

    #[test]
    fn remove_preserves_order() {
        let mut q = RequestQueue::new();
        for n in 1..=4 {
            q.push(req(n, Priority::Medium, 1.0));
        }
        let removed = q.remove(RequestId::from_u128(2)).unwrap();
        assert_eq!(removed.id, RequestId::from_u128(2));
        let ids: Vec<_> = q.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3, 4].map(RequestId::from_u128));
        assert!(q.remove(RequestId::from_u128(2)).is_none());
    }

    #[test]
    fn set_status_and_waiting_count() {
        let mut q = RequestQueue::new();
        q.push(req(1, Priority::High, 1.0));
        q.push(req(2, Priority::High, 1.0));
        assert_eq!(q.waiting_count(), 2);
        assert!(q.set_status(RequestId::from_u128(1), RequestStatus::Staging));
        assert!(!q.set_status(RequestId::from_u128(9), RequestStatus::Staging));
        assert_eq!(q.waiting_count(), 1);
        assert!(q.get(RequestId::from_u128(1)).unwrap().status.is_claimed());
    }
}

#[cfg(test)]
mod queue_props {
    use proptest::prelude::*;

    use super::req;
    use crate::{Priority, RequestQueue};

    fn priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
    }

    proptest! {
        #[test]
        fn sorted_queue_keeps_arrival_order_within_priority(
            prios in prop::collection::vec(priority(), 0..40)
        ) {
            let mut q = RequestQueue::new();
            for (i, p) in prios.iter().enumerate() {
                q.push(req(i as u128, *p, 1.0));
            }
            q.sort_by_priority();
            prop_assert!(q.is_sorted_by_priority());
            prop_assert_eq!(q.len(), prios.len());
            // created_at was the arrival index: it must ascend within each priority band.
            for w in q.as_slice().windows(2) {
                if w[0].priority == w[1].priority {
                    prop_assert!(w[0].created_at < w[1].created_at);
                }
            }
        }
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_requests_reader, Priority, QueueError};

    const CSV: &str = "\
street,number,neighbourhood,lat,lng,weight,priority\n\
Rua da Bahia,1148,Centro,-19.9191,-43.9386,2.5,high\n\
Av. Afonso Pena,,,-19.9320,-43.9310,4.0,low\n\
";

    #[test]
    fn loads_valid_rows() {
        let drafts = load_requests_reader(Cursor::new(CSV), 12.0).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].priority, Priority::High);
        assert_eq!(drafts[0].number.as_deref(), Some("1148"));
        assert!(drafts[1].number.is_none());
        assert!(drafts[1].neighbourhood.is_none());
    }

    #[test]
    fn oversized_row_reports_line() {
        let csv = "street,number,neighbourhood,lat,lng,weight,priority\n\
                   Rua A,1,,-19.9,-43.9,1.0,high\n\
                   Rua B,2,,-19.9,-43.9,15.0,high\n";
        let err = load_requests_reader(Cursor::new(csv), 12.0).unwrap_err();
        assert!(matches!(err, QueueError::Rejected { row: 3, .. }), "got {err:?}");
    }

    #[test]
    fn bad_priority_is_parse_error() {
        let csv = "street,number,neighbourhood,lat,lng,weight,priority\n\
                   Rua A,1,,-19.9,-43.9,1.0,urgent\n";
        assert!(matches!(
            load_requests_reader(Cursor::new(csv), 12.0),
            Err(QueueError::Parse(_))
        ));
    }
}
