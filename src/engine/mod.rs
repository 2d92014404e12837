// src/engine/mod.rs

//! The per-run phases and the main loop.
//!
//! - [`cycle`] implements stage and finalize for a single queued run and the
//!   typed per-run report the loop logs.
//! - [`pacing`] is the inter-cycle wait with periodic progress logging.
//! - [`runtime`] drives the forever loop:
//!   intake → (stage → process → finalize)* → sleep.

pub mod cycle;
pub mod pacing;
pub mod runtime;

pub use cycle::{FinalizeReport, REPORTS_DIR, SUCCESS_SIGNAL};
pub use runtime::Runtime;
