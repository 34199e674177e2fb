//! Input validation helpers for the Water Plant Inventory service
//!
//! Shared by the backend services and the WASM module so both sides accept
//! and reject the same inputs.

use rust_decimal::Decimal;

/// Validate that a quantity is strictly positive (produced quantities,
/// replenishment entries, manual material lines)
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate that a stock-keeping figure is not negative (current stock,
/// minimum stock, average consumption, unit cost)
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate that a sale price is strictly positive
pub fn validate_sale_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Sale price must be greater than zero");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}
