use soroban_sdk::contracttype;

use crate::GovernanceError;

/// Error categories for classifying failures
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Lifecycle errors: missing or repeated initialisation
    Lifecycle = 1,
    /// Validation errors: invalid addresses, amounts or payloads
    Validation = 2,
    /// Authorization errors: caller lacks the entitled role
    Authorization = 3,
    /// Not found errors: unknown proposal or record
    NotFound = 4,
    /// State conflict errors: executed, expired or absent targets
    StateConflict = 5,
    /// Timelock errors: a delay or cooldown has not elapsed
    Timelock = 6,
    /// System errors: pause and circuit breaker
    System = 7,
    /// Transfer guard errors raised by consuming contracts
    TransferGuard = 8,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl GovernanceError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GovernanceError::NotInitialized | GovernanceError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            GovernanceError::InvalidAddress
            | GovernanceError::InvalidAmount
            | GovernanceError::InvalidParameter
            | GovernanceError::CannotRecoverNativeAsset => ErrorCategory::Validation,
            GovernanceError::Unauthorized => ErrorCategory::Authorization,
            GovernanceError::NotFound => ErrorCategory::NotFound,
            GovernanceError::InvalidState => ErrorCategory::StateConflict,
            GovernanceError::MinDelayNotElapsed | GovernanceError::CooldownActive => {
                ErrorCategory::Timelock
            }
            GovernanceError::EnforcedPause | GovernanceError::CircuitBreakerTripped => {
                ErrorCategory::System
            }
            GovernanceError::NotWhitelisted
            | GovernanceError::LowAllowance
            | GovernanceError::LowBalance => ErrorCategory::TransferGuard,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GovernanceError::InvalidAddress
            | GovernanceError::InvalidAmount
            | GovernanceError::InvalidParameter
            | GovernanceError::NotFound
            | GovernanceError::MinDelayNotElapsed
            | GovernanceError::CooldownActive
            | GovernanceError::NotWhitelisted
            | GovernanceError::LowBalance => ErrorSeverity::Low,
            GovernanceError::InvalidState
            | GovernanceError::LowAllowance
            | GovernanceError::AlreadyInitialized => ErrorSeverity::Medium,
            GovernanceError::Unauthorized
            | GovernanceError::NotInitialized
            | GovernanceError::CannotRecoverNativeAsset => ErrorSeverity::High,
            GovernanceError::EnforcedPause | GovernanceError::CircuitBreakerTripped => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Returns `true` when the same call may succeed later without any
    /// change, once a timelock elapses or a halt is lifted. The engine never
    /// retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GovernanceError::MinDelayNotElapsed
                | GovernanceError::CooldownActive
                | GovernanceError::EnforcedPause
                | GovernanceError::CircuitBreakerTripped
                | GovernanceError::NotWhitelisted
        )
    }

    /// Returns a human-readable message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            GovernanceError::NotInitialized => "Contract has not been initialized",
            GovernanceError::AlreadyInitialized => "Contract is already initialized",
            GovernanceError::Unauthorized => "Caller does not hold the entitled role",
            GovernanceError::NotFound => "Proposal or record not found",
            GovernanceError::InvalidAddress => "Target address is missing or self-referential",
            GovernanceError::InvalidAmount => "Amount must be positive",
            GovernanceError::InvalidParameter => "Invalid parameter or proposal payload",
            GovernanceError::InvalidState => "Operation not allowed in the current state",
            GovernanceError::MinDelayNotElapsed => "Proposal approval delay has not elapsed",
            GovernanceError::CooldownActive => "Cooldown since the previous change is active",
            GovernanceError::EnforcedPause => "Contract operations are paused",
            GovernanceError::CircuitBreakerTripped => "Circuit breaker is tripped",
            GovernanceError::NotWhitelisted => "Destination is not whitelisted or still locked",
            GovernanceError::LowAllowance => "Amount exceeds the role transaction limit",
            GovernanceError::LowBalance => "Insufficient balance",
            GovernanceError::CannotRecoverNativeAsset => "The native asset cannot be recovered",
        }
    }
}
