//! Vehicle fleet tests
//!
//! Covers the dispatch cycle's status transitions and the status string
//! round trip the store relies on.

use proptest::prelude::*;

use shared::VehicleStatus;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Dispatch requires an available vehicle; one already out delivering or
    /// in the workshop is rejected
    #[test]
    fn test_dispatch_requires_available() {
        assert!(VehicleStatus::Available.can_transition_to(VehicleStatus::OnDelivery));
        assert!(!VehicleStatus::OnDelivery.can_transition_to(VehicleStatus::OnDelivery));
        assert!(!VehicleStatus::Maintenance.can_transition_to(VehicleStatus::OnDelivery));
    }

    #[test]
    fn test_release_returns_to_available() {
        assert!(VehicleStatus::OnDelivery.can_transition_to(VehicleStatus::Available));
        assert!(!VehicleStatus::Available.can_transition_to(VehicleStatus::Available));
    }

    #[test]
    fn test_maintenance_only_from_available() {
        assert!(VehicleStatus::Available.can_transition_to(VehicleStatus::Maintenance));
        assert!(!VehicleStatus::OnDelivery.can_transition_to(VehicleStatus::Maintenance));
        assert!(VehicleStatus::Maintenance.can_transition_to(VehicleStatus::Available));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::OnDelivery,
            VehicleStatus::Maintenance,
        ] {
            assert_eq!(VehicleStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VehicleStatus::parse("parked"), None);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn status_strategy() -> impl Strategy<Value = VehicleStatus> {
    prop_oneof![
        Just(VehicleStatus::Available),
        Just(VehicleStatus::OnDelivery),
        Just(VehicleStatus::Maintenance),
    ]
}

proptest! {
    /// Every allowed move starts or ends at available, and never keeps the
    /// vehicle where it was
    #[test]
    fn transitions_pivot_on_available(from in status_strategy(), to in status_strategy()) {
        if from.can_transition_to(to) {
            prop_assert!(from == VehicleStatus::Available || to == VehicleStatus::Available);
            prop_assert!(from != to);
        }
    }
}
