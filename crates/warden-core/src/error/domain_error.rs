//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::IdParseError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Punishment not found: {0}")]
    PunishmentNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(#[from] IdParseError),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Duration too long: max {max_ms} ms")]
    DurationTooLong { max_ms: i64 },

    #[error("Amount must be positive")]
    InvalidAmount,

    // =========================================================================
    // Policy Violations
    // =========================================================================
    #[error("Insufficient balance: have {balance}, need {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },

    #[error("Balance would leave the 64-bit range")]
    BalanceOverflow,

    #[error("Cannot transfer to yourself")]
    SelfTransfer,

    #[error("Daily reward already claimed today")]
    DailyAlreadyClaimed,

    #[error("Dangerous commands are disabled for this guild")]
    DangerousCommandsDisabled,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PunishmentNotFound(_) => "UNKNOWN_PUNISHMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::DurationTooLong { .. } => "DURATION_TOO_LONG",
            Self::InvalidAmount => "INVALID_AMOUNT",

            // Policy
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::BalanceOverflow => "BALANCE_OVERFLOW",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::DailyAlreadyClaimed => "DAILY_ALREADY_CLAIMED",
            Self::DangerousCommandsDisabled => "DANGEROUS_COMMANDS_DISABLED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PunishmentNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidId(_)
                | Self::InvalidDuration(_)
                | Self::DurationTooLong { .. }
                | Self::InvalidAmount
        )
    }

    /// Check if this is a business-policy violation reported to the end user
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. }
                | Self::BalanceOverflow
                | Self::SelfTransfer
                | Self::DailyAlreadyClaimed
                | Self::DangerousCommandsDisabled
        )
    }

    /// Check if this is an infrastructure failure the caller may retry
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::InsufficientFunds {
            balance: 5,
            requested: 10,
        };
        assert_eq!(err.code(), "INSUFFICIENT_FUNDS");

        let err = DomainError::DatabaseError("locked".to_string());
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::PunishmentNotFound("g/u/ban".to_string()).is_not_found());
        assert!(DomainError::SelfTransfer.is_policy());
        assert!(DomainError::DailyAlreadyClaimed.is_policy());
        assert!(DomainError::BalanceOverflow.is_policy());
        assert!(DomainError::InvalidAmount.is_validation());
        assert!(DomainError::InvalidId(IdParseError::Empty).is_validation());
        assert!(DomainError::DatabaseError("x".to_string()).is_infrastructure());
        assert!(!DomainError::SelfTransfer.is_infrastructure());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InsufficientFunds {
            balance: 40,
            requested: 100,
        };
        assert_eq!(err.to_string(), "Insufficient balance: have 40, need 100");

        let err = DomainError::DurationTooLong { max_ms: 1000 };
        assert_eq!(err.to_string(), "Duration too long: max 1000 ms");
    }
}
