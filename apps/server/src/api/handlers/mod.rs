//! Request handlers for API endpoints
//!
//! Handlers extract and validate the request, call the terminology engine and
//! format the response. The engine is synchronous and cheap, so it is called
//! inline on the async task.

pub mod encounter;
pub mod fhir;
pub mod mapping;
pub mod terminology;
