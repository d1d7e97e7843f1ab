//! Services module
//!
//! Integraciones con colaboradores externos que quedan fuera del ciclo
//! request/response principal.

pub mod notifications;

pub use notifications::*;
