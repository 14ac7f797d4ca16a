//! Factory members (payroll)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A worker on the factory payroll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub role: MemberRole,
    pub salary: Decimal,
    pub joining_date: NaiveDate,
    pub address: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payroll roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Operator,
    Helper,
    Driver,
    Supervisor,
    Other,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Operator => "operator",
            MemberRole::Helper => "helper",
            MemberRole::Driver => "driver",
            MemberRole::Supervisor => "supervisor",
            MemberRole::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operator" => Some(MemberRole::Operator),
            "helper" => Some(MemberRole::Helper),
            "driver" => Some(MemberRole::Driver),
            "supervisor" => Some(MemberRole::Supervisor),
            "other" => Some(MemberRole::Other),
            _ => None,
        }
    }
}

/// Whether a member is currently employed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(MemberStatus::Active),
            "inactive" => Some(MemberStatus::Inactive),
            _ => None,
        }
    }
}
