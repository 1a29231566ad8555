use thiserror::Error;

use crate::model::{RegenTarget, StrategyKey, Step};

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Brandloom.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum LoomError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Capability gateway ──────────────────────────────────────────────
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),

    // ── Wizard workflow ─────────────────────────────────────────────────
    #[error("workflow: {0}")]
    Workflow(#[from] WorkflowError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to save config: {0}")]
    Save(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Gateway errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Brand analysis returned no parsable structured payload.
    #[error("brand analysis failed: {0}")]
    Analysis(String),

    /// A copy or poster call returned no usable payload, or rejected outright.
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("{endpoint} request failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("API key not found. Set GEMINI_API_KEY or add it to config.toml")]
    Auth,
}

// ─── Workflow errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required input is missing. Checked before any gateway call is issued.
    #[error("validation: {0}")]
    Validation(String),

    #[error("cannot {action} from step {step}")]
    Transition { step: Step, action: &'static str },

    /// Single-poster regeneration requested for a deliverable that has no
    /// strategy entry from the last full pass.
    #[error("no strategy entry for {0}; run a full generation first")]
    MissingStrategy(StrategyKey),

    /// A regeneration for this target is already in flight.
    #[error("regeneration already in flight for {0}")]
    RegenerationInFlight(RegenTarget),

    #[error("no generated content yet")]
    NoContent,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LoomError>;
