//! Member service: the factory payroll roster

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    validate_name, validate_non_negative_amount, validate_phone, Member, MemberRole, MemberStatus,
};

/// Member service
#[derive(Clone)]
pub struct MemberService {
    db: PgPool,
}

/// Database row for a member
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    role: String,
    salary: Decimal,
    joining_date: NaiveDate,
    address: Option<String>,
    aadhar_number: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MemberRow {
    fn into_model(self) -> AppResult<Member> {
        let role = MemberRole::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("unknown member role: {}", self.role)))?;
        let status = MemberStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("unknown member status: {}", self.status)))?;
        Ok(Member {
            id: self.id,
            name: self.name,
            phone: self.phone,
            role,
            salary: self.salary,
            joining_date: self.joining_date,
            address: self.address,
            aadhar_number: self.aadhar_number,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for adding a member
#[derive(Debug, Deserialize)]
pub struct CreateMemberInput {
    pub name: String,
    pub phone: Option<String>,
    pub role: MemberRole,
    pub salary: Decimal,
    pub joining_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub aadhar_number: Option<String>,
}

/// Input for updating a member
#[derive(Debug, Deserialize)]
pub struct UpdateMemberInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<MemberRole>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: Option<MemberStatus>,
}

const MEMBER_COLUMNS: &str = "id, name, phone, role, salary, joining_date, address, \
                              aadhar_number, status, created_at, updated_at";

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a member to the roster, active by default
    pub async fn create_member(&self, input: CreateMemberInput) -> AppResult<Member> {
        validate_name(&input.name).map_err(|msg| AppError::validation("name", msg))?;
        validate_non_negative_amount(input.salary)
            .map_err(|msg| AppError::validation("salary", msg))?;
        if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            validate_phone(phone).map_err(|msg| AppError::validation("phone", msg))?;
        }

        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "INSERT INTO members (name, phone, role, salary, joining_date, address, aadhar_number, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'active')
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(input.name.trim())
        .bind(&input.phone)
        .bind(input.role.as_str())
        .bind(input.salary)
        .bind(input.joining_date.unwrap_or_else(|| Utc::now().date_naive()))
        .bind(&input.address)
        .bind(&input.aadhar_number)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Get a member by id
    pub async fn get_member(&self, member_id: Uuid) -> AppResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(member_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Member".to_string()))?;

        row.into_model()
    }

    /// List the roster, active members first, then by name
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY status, name"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MemberRow::into_model).collect()
    }

    /// Update a member's details or status
    pub async fn update_member(
        &self,
        member_id: Uuid,
        input: UpdateMemberInput,
    ) -> AppResult<Member> {
        let existing = self.get_member(member_id).await?;

        let name = match input.name {
            Some(n) => {
                validate_name(&n).map_err(|msg| AppError::validation("name", msg))?;
                n.trim().to_string()
            }
            None => existing.name,
        };
        let salary = input.salary.unwrap_or(existing.salary);
        validate_non_negative_amount(salary)
            .map_err(|msg| AppError::validation("salary", msg))?;
        let phone = input.phone.or(existing.phone);
        if let Some(p) = phone.as_deref().filter(|p| !p.trim().is_empty()) {
            validate_phone(p).map_err(|msg| AppError::validation("phone", msg))?;
        }

        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "UPDATE members
             SET name = $1, phone = $2, role = $3, salary = $4, address = $5,
                 aadhar_number = $6, status = $7, updated_at = NOW()
             WHERE id = $8
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&name)
        .bind(&phone)
        .bind(input.role.unwrap_or(existing.role).as_str())
        .bind(salary)
        .bind(input.address.or(existing.address))
        .bind(input.aadhar_number.or(existing.aadhar_number))
        .bind(input.status.unwrap_or(existing.status).as_str())
        .bind(member_id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Remove a member from the roster
    pub async fn delete_member(&self, member_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(member_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member".to_string()));
        }

        Ok(())
    }
}
