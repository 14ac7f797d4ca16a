//! Vehicle service: the delivery fleet and its dispatch cycle
//!
//! A vehicle moves available -> on_delivery when dispatched against an
//! invoice, and back when released; the invoice's delivery status moves with
//! it in the same transaction. Maintenance is only entered from available.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::sales::SalesService;
use shared::{validate_name, DeliveryStatus, Vehicle, VehicleStatus};

/// Vehicle service
#[derive(Clone)]
pub struct VehicleService {
    db: PgPool,
}

/// Database row for a vehicle
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    registration: String,
    status: String,
    current_invoice_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_model(self) -> AppResult<Vehicle> {
        let status = VehicleStatus::parse(&self.status).ok_or_else(|| {
            AppError::Internal(format!("unknown vehicle status: {}", self.status))
        })?;
        Ok(Vehicle {
            id: self.id,
            name: self.name,
            registration: self.registration,
            status,
            current_invoice_id: self.current_invoice_id,
            created_at: self.created_at,
        })
    }
}

/// Input for registering a vehicle
#[derive(Debug, Deserialize)]
pub struct CreateVehicleInput {
    pub name: String,
    pub registration: String,
}

/// Input for dispatching a vehicle
#[derive(Debug, Deserialize)]
pub struct DispatchInput {
    pub invoice_id: Uuid,
}

const VEHICLE_COLUMNS: &str = "id, name, registration, status, current_invoice_id, created_at";

impl VehicleService {
    /// Create a new VehicleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a vehicle, available by default
    pub async fn create_vehicle(&self, input: CreateVehicleInput) -> AppResult<Vehicle> {
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        if input.registration.trim().is_empty() {
            return Err(AppError::validation(
                "registration",
                "Registration number is required",
            ));
        }

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "INSERT INTO vehicles (name, registration, status)
             VALUES ($1, $2, 'available')
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(input.registration.trim())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateEntry("registration".to_string())
            }
            _ => AppError::from(e),
        })?;

        row.into_model()
    }

    /// Get a vehicle by id
    pub async fn get_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(vehicle_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle".to_string()))?;

        row.into_model()
    }

    /// List the fleet
    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(VehicleRow::into_model).collect()
    }

    /// Remove a vehicle; refused while it is out on a delivery
    pub async fn delete_vehicle(&self, vehicle_id: Uuid) -> AppResult<()> {
        let vehicle = self.get_vehicle(vehicle_id).await?;
        if vehicle.status == VehicleStatus::OnDelivery {
            return Err(AppError::InvalidStateTransition(
                "cannot remove a vehicle that is out on a delivery".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Dispatch an available vehicle against an invoice
    ///
    /// The vehicle flip and the invoice's move to in_transit share one
    /// transaction; the status guard stops two dispatches of the same vehicle
    /// from both succeeding.
    pub async fn dispatch(&self, vehicle_id: Uuid, input: DispatchInput) -> AppResult<Vehicle> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles
             SET status = 'on_delivery', current_invoice_id = $2
             WHERE id = $1 AND status = 'available'
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(vehicle_id)
        .bind(input.invoice_id)
        .fetch_optional(&mut *tx)
        .await?;

        let vehicle = match row {
            Some(row) => row.into_model()?,
            None => return Err(self.not_available_error(vehicle_id, "dispatch").await?),
        };

        SalesService::set_vehicle_on(
            &mut tx,
            input.invoice_id,
            Some(vehicle_id),
            DeliveryStatus::InTransit,
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Dispatched vehicle {} for delivery", vehicle.registration);
        Ok(vehicle)
    }

    /// Release a vehicle back from a delivery, marking the invoice delivered
    pub async fn release(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let mut tx = self.db.begin().await?;

        // Row-lock the vehicle so the invoice id read here and the flip below
        // see the same dispatch
        let invoice_id = sqlx::query_scalar::<_, Option<Uuid>>(
            "SELECT current_invoice_id FROM vehicles
             WHERE id = $1 AND status = 'on_delivery'
             FOR UPDATE",
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *tx)
        .await?;

        let invoice_id = match invoice_id {
            Some(id) => id,
            None => return Err(self.not_available_error(vehicle_id, "release").await?),
        };

        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles
             SET status = 'available', current_invoice_id = NULL
             WHERE id = $1
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(vehicle_id)
        .fetch_one(&mut *tx)
        .await?;
        let vehicle = row.into_model()?;

        if let Some(invoice_id) = invoice_id {
            SalesService::set_vehicle_on(&mut tx, invoice_id, None, DeliveryStatus::Delivered)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Released vehicle {} from delivery", vehicle.registration);
        Ok(vehicle)
    }

    /// Send an available vehicle to maintenance
    pub async fn start_maintenance(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles
             SET status = 'maintenance'
             WHERE id = $1 AND status = 'available'
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(vehicle_id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => row.into_model(),
            None => Err(self.not_available_error(vehicle_id, "send to maintenance").await?),
        }
    }

    /// Return a vehicle from maintenance
    pub async fn end_maintenance(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles
             SET status = 'available'
             WHERE id = $1 AND status = 'maintenance'
             RETURNING {VEHICLE_COLUMNS}"
        ))
        .bind(vehicle_id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => row.into_model(),
            None => {
                let status = self.vehicle_status(vehicle_id).await?;
                Err(AppError::InvalidStateTransition(format!(
                    "cannot return from maintenance a vehicle in status {}",
                    status.as_str()
                )))
            }
        }
    }

    async fn vehicle_status(&self, vehicle_id: Uuid) -> AppResult<VehicleStatus> {
        let status = sqlx::query_scalar::<_, String>("SELECT status FROM vehicles WHERE id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle".to_string()))?;

        VehicleStatus::parse(&status)
            .ok_or_else(|| AppError::Internal(format!("unknown vehicle status: {status}")))
    }

    /// Build the error for a guarded update that matched no row
    async fn not_available_error(&self, vehicle_id: Uuid, verb: &str) -> AppResult<AppError> {
        let status = self.vehicle_status(vehicle_id).await?;
        Ok(AppError::InvalidStateTransition(format!(
            "cannot {} a vehicle in status {}",
            verb,
            status.as_str()
        )))
    }
}
