use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Planline.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PlanlineError {
    // ── Tool registry ────────────────────────────────────────────────────
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    // ── Plan parsing / validation ───────────────────────────────────────
    #[error("plan: {0}")]
    Plan(#[from] PlanError),

    // ── Reference resolution ────────────────────────────────────────────
    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),

    // ── Plan producer ───────────────────────────────────────────────────
    #[error("producer: {0}")]
    Producer(#[from] ProducerError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Registry errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool {name} is already registered")]
    Duplicate { name: String },

    #[error("tool {name} not found")]
    Unknown { name: String },

    #[error("tool {name} has an invalid parameter spec: {detail}")]
    InvalidSpec { name: String, detail: String },
}

// ─── Plan parse / validation errors ──────────────────────────────────────────

/// Violations detected before execution begins. Validation is fail-fast: the
/// first violation rejects the plan wholesale and nothing executes.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("malformed plan document: {0}")]
    Malformed(String),

    #[error("step count mismatch: STEPS declares {declared}, found {found} step entries")]
    StepCountMismatch { declared: usize, found: usize },

    #[error("step {step}: unknown tool {name}")]
    UnknownTool { step: usize, name: String },

    #[error("step {step}: missing required input {name}")]
    MissingInput { step: usize, name: String },

    #[error("step {step}: unexpected input {name}")]
    UnexpectedInput { step: usize, name: String },

    #[error("step {step}: input {input} holds a malformed reference {raw:?}")]
    MalformedReference {
        step: usize,
        input: String,
        raw: String,
    },

    #[error("step {step}: dangling reference {reference}: {detail}")]
    DanglingReference {
        step: usize,
        reference: String,
        detail: String,
    },
}

// ─── Resolution errors ───────────────────────────────────────────────────────

/// Unreachable after validation; hitting this at runtime means the symbol
/// table was not populated in strict execution order.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("reference {step}{letter} has no entry in the symbol table")]
    Unresolved { step: usize, letter: char },
}

// ─── Producer errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("no API key configured (set api_key in config.toml or the OPENAI_API env var)")]
    MissingApiKey,

    #[error("producer {producer} request failed: {message}")]
    Request { producer: String, message: String },

    #[error("producer returned an unparseable plan payload: {0}")]
    Payload(String),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PlanlineError>;
