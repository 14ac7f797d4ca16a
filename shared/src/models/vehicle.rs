//! Transport vehicles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A delivery vehicle owned by the factory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub registration: String,
    pub status: VehicleStatus,
    /// Set while the vehicle is out delivering an invoice
    pub current_invoice_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Vehicle availability states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    OnDelivery,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::OnDelivery => "on_delivery",
            VehicleStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(VehicleStatus::Available),
            "on_delivery" => Some(VehicleStatus::OnDelivery),
            "maintenance" => Some(VehicleStatus::Maintenance),
            _ => None,
        }
    }

    /// Whether a fleet status change is allowed: dispatch and maintenance
    /// both start from available, and both end back at available
    pub fn can_transition_to(&self, next: VehicleStatus) -> bool {
        matches!(
            (self, next),
            (VehicleStatus::Available, VehicleStatus::OnDelivery)
                | (VehicleStatus::Available, VehicleStatus::Maintenance)
                | (VehicleStatus::OnDelivery, VehicleStatus::Available)
                | (VehicleStatus::Maintenance, VehicleStatus::Available)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_only_from_available() {
        assert!(VehicleStatus::Available.can_transition_to(VehicleStatus::OnDelivery));
        assert!(!VehicleStatus::OnDelivery.can_transition_to(VehicleStatus::OnDelivery));
        assert!(!VehicleStatus::Maintenance.can_transition_to(VehicleStatus::OnDelivery));
    }

    #[test]
    fn maintenance_cycle_goes_through_available() {
        assert!(VehicleStatus::Available.can_transition_to(VehicleStatus::Maintenance));
        assert!(VehicleStatus::Maintenance.can_transition_to(VehicleStatus::Available));
        assert!(!VehicleStatus::OnDelivery.can_transition_to(VehicleStatus::Maintenance));
    }
}
