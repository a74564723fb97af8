//! AYUSH terminology server
//!
//! HTTP front end for [`ayush_terminology`]:
//! - NAMASTE catalog search, auto-complete and group selection
//! - Translation between NAMASTE, ICD-11 TM2 and biomedicine codes
//! - CSV import and synthetic mapping of tabular rows
//! - CodeSystem, ConceptMap and Bundle generation

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
