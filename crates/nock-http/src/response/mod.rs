//! Construction of synthesized HTTP responses.

mod builder;

pub use builder::ResponseBuilder;
