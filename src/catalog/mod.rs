//! Catálogo estático del storefront
//!
//! Dataset embebido y pipeline puro de filtrado/orden/paginación. La
//! consola admin no pasa por acá: su inventario vive en la base de datos.

pub mod dataset;
pub mod search;
