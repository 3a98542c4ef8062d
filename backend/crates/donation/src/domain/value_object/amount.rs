//! Donation amount
//!
//! Currency-agnostic positive number. Accepts a JSON number or a numeric
//! string on input.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> AppResult<Self> {
        if !value.is_finite() {
            return Err(AppError::bad_request("Amount must be a valid number"));
        }
        if value <= 0.0 {
            return Err(AppError::bad_request("Amount must be greater than 0"));
        }
        Ok(Self(value))
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::bad_request("Amount must be a valid number"))?;
        Self::new(value)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl TryFrom<AmountInput> for Amount {
    type Error = AppError;

    fn try_from(input: AmountInput) -> AppResult<Self> {
        match input {
            AmountInput::Number(value) => Amount::new(value),
            AmountInput::Text(raw) => Amount::parse(&raw),
        }
    }
}
