//! Field constraint checks shared by create and partial update.

use crate::error::AppError;
use crate::model::{ItemPatch, NewItem};

pub const NAME_MIN_LENGTH: usize = 2;
/// Width of the `name` column in the relational backend.
pub const NAME_MAX_LENGTH: usize = 200;

pub struct ItemValidator;

impl ItemValidator {
    /// Validate a create payload. Every field is required.
    pub fn validate(item: &NewItem) -> Result<(), AppError> {
        validate_name(&item.name)?;
        validate_price(item.price)?;
        validate_stock(item.stock)?;
        Ok(())
    }

    /// Validate only the fields present in the patch (for PATCH). The patch is
    /// rejected as a whole on the first invalid field.
    pub fn validate_partial(patch: &ItemPatch) -> Result<(), AppError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(stock) = patch.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.chars().count();
    if len < NAME_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "name must be at least {} characters",
            NAME_MIN_LENGTH
        )));
    }
    if len > NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "name must be at most {} characters",
            NAME_MAX_LENGTH
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() {
        return Err(AppError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(AppError::Validation("price must be at least 0".into()));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> Result<(), AppError> {
    if stock < 0 {
        return Err(AppError::Validation("stock must be at least 0".into()));
    }
    Ok(())
}
