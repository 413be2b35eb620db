//! Candidate enumeration and existence probing.
//!
//! Two discovery policies are supported:
//!
//! - **Bounded**: generate exactly N candidates, then validate them all with
//!   concurrent HEAD probes ([`bounded_candidates`] + [`validate_bounded`]).
//! - **Adaptive**: interleave generation and validation in one sequential
//!   loop that stops after a consecutive-miss streak ([`discover_adaptive`]).

mod adaptive;
mod candidate;
mod error;
mod probe;
mod validate;

pub use adaptive::{AdaptiveOutcome, DEFAULT_MISS_THRESHOLD, discover_adaptive};
pub use candidate::{Candidate, ValidationResult, bounded_candidates};
pub use error::DiscoverError;
pub use probe::{HeadProber, PROBE_TIMEOUT_SECS, Probe, Prober};
pub use validate::validate_bounded;
