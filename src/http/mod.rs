//! Minimal HTTP message values consumed by the dispatcher.
//!
//! Both types are immutable values: every `with_*` mutator returns a
//! modified copy and leaves the original untouched.

mod request;
mod response;

pub use request::Request;
pub use response::Response;
