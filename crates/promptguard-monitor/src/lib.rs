//! # PromptGuard Monitor - Outbound Response Screening
//!
//! Everything the firewall checks AFTER the model has produced text:
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`LeakageMonitor`] | Canary-token lifecycle plus PII/secret pattern scan |
//! | [`PolicyEnforcer`] | Banned-phrase scan over the response |
//!
//! The canary token is generated once at monitor construction and never
//! mutated afterwards, so it is safe to read concurrently without locking.

pub mod leakage;
pub mod policy;

pub use leakage::{LeakFinding, LeakageMonitor};
pub use policy::PolicyEnforcer;
