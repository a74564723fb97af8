//! Resource and datatype shapes
//!
//! Only the elements the terminology engine reads or writes are modelled; the
//! JSON they produce is valid under R4 and R5 alike.

pub mod bundle;
pub mod code_system;
pub mod complex;
pub mod concept_map;
pub mod error;
pub mod resource;

pub use bundle::*;
pub use code_system::*;
pub use complex::*;
pub use concept_map::*;
pub use error::{Error, Result};
pub use resource::*;
