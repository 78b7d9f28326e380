//! Observability for the tfrec CLI
//!
//! Structured JSON line logging: one event per line, deterministic key
//! ordering, synchronous, no buffering. The library layer stays silent;
//! only the CLI logs.

mod logger;

pub use logger::{Logger, Severity};
