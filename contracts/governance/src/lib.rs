//! Shared governance engine for the governed contract suite.
//!
//! Every consuming contract embeds the engine in its own instance and
//! persistent storage and exposes thin entry points over it:
//! - [`roles`]: role membership, per-role quorum and transaction limits.
//! - [`store`] / [`proposal`] / [`engine`]: timelocked multi-party proposals.
//! - [`whitelist`]: allow-list with a post-approval lock period.
//! - [`wallets`]: governed distribution wallets.
//! - [`emergency`]: pause with cooldown and a block-based circuit breaker.
//!
//! Consumers share [`GovernanceError`]; contract-specific codes, if ever
//! needed, start at **100**.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod config;
pub mod emergency;
pub mod engine;
pub mod errors;
pub mod events;
pub mod proposal;
pub mod roles;
pub mod store;
pub mod validation;
pub mod wallets;
pub mod whitelist;

pub use config::GovernanceConfig;
pub use emergency::{BreakerState, EmergencyAction, EmergencyState};
pub use errors::{ErrorCategory, ErrorSeverity};
pub use proposal::{try_execute, Action, Proposal, ProposalStatus, ProposalType};
pub use roles::{RoleConfig, RoleId};
pub use whitelist::WhitelistEntry;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the engine and every consuming contract.
///
/// # Code ranges
/// | Range   | Purpose                          |
/// |---------|----------------------------------|
/// | 1 – 9   | Lifecycle / initialisation       |
/// | 10 – 19 | Authorisation                    |
/// | 20 – 29 | Resource not found               |
/// | 30 – 39 | Validation / input               |
/// | 40 – 49 | Proposal and registry state      |
/// | 50 – 59 | Timelocks                        |
/// | 60 – 69 | Engine-wide halts                |
/// | 70 – 79 | Consumer value-transfer guards   |
/// | 80 – 89 | Recovery                         |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum GovernanceError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// `initialize` was called more than once.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller lacks the role entitled to perform the operation.
    Unauthorized = 10,

    // ── Not-found (20–29) ────────────────────────────────────
    /// The requested proposal or record does not exist.
    NotFound = 20,

    // ── Validation (30–39) ───────────────────────────────────
    /// Missing or self-referential target address.
    InvalidAddress = 30,

    /// Zero, negative or otherwise unusable amount.
    InvalidAmount = 31,

    /// Structurally invalid payload or configuration value.
    InvalidParameter = 32,

    // ── State (40–49) ────────────────────────────────────────
    /// Proposal already executed or expired, removal target absent, or the
    /// requested transition would not change anything.
    InvalidState = 40,

    // ── Timelocks (50–59) ────────────────────────────────────
    /// The proposal's approval delay has not elapsed yet.
    MinDelayNotElapsed = 50,

    /// A cooldown since the previous mutation is still running.
    CooldownActive = 51,

    // ── Halts (60–69) ────────────────────────────────────────
    /// Operations are paused.
    EnforcedPause = 60,

    /// The circuit breaker is tripped and has not auto-reset yet.
    CircuitBreakerTripped = 61,

    // ── Consumer guards (70–79) ──────────────────────────────
    /// Destination is not whitelisted, or its whitelist lock is still active.
    NotWhitelisted = 70,

    /// Amount exceeds the role's per-transaction limit.
    LowAllowance = 71,

    /// The source balance does not cover the amount.
    LowBalance = 72,

    // ── Recovery (80–89) ─────────────────────────────────────
    /// Governance may never recover the governed native asset.
    CannotRecoverNativeAsset = 80,
}
