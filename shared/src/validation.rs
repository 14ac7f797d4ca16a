//! Validation utilities for the Block Factory Management Platform
//!
//! Includes India-specific checks (GST, phone) used on customer records.

use rust_decimal::Decimal;

// ============================================================================
// Money and Quantity Validations
// ============================================================================

/// Validate a monetary amount is strictly positive
pub fn validate_positive_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate a monetary amount is not negative
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a unit quantity is strictly positive
pub fn validate_positive_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Check whether applying `delta` to `current` would go negative
pub fn would_go_negative(current: i64, delta: i64) -> bool {
    current + delta < 0
}

// ============================================================================
// Identity Validations
// ============================================================================

/// Validate an Indian phone number (10 digits, optional +91 prefix)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone
        .trim()
        .trim_start_matches("+91")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() != 10 {
        return Err("Phone number must have 10 digits");
    }
    Ok(())
}

/// Validate a GSTIN format (15 alphanumeric characters, state code prefix)
pub fn validate_gst_number(gst: &str) -> Result<(), &'static str> {
    let gst = gst.trim();
    if gst.len() != 15 {
        return Err("GST number must be 15 characters");
    }
    if !gst.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("GST number must be alphanumeric");
    }
    if !gst.chars().take(2).all(|c| c.is_ascii_digit()) {
        return Err("GST number must start with a 2-digit state code");
    }
    Ok(())
}

/// Validate a non-empty trimmed name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}
