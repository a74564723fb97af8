pub mod api;
pub mod fhir;
