//! Repositorios
//!
//! Acceso a datos, un repositorio por agregado. El store es opaco para el
//! resto del sistema: los controllers solo ven estas interfaces.

pub mod car_repository;
pub mod dealership_repository;
pub mod lead_repository;
pub mod user_repository;
