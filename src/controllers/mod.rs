//! Controllers
//!
//! Fachada CRUD de cada agregado: validación, chequeos de unicidad y
//! orquestación de efectos. Las rutas delegan acá y acá se delega a los
//! repositorios.

pub mod auth_controller;
pub mod car_controller;
pub mod dealership_controller;
pub mod lead_controller;
pub mod social_media_controller;
