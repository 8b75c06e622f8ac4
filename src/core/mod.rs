// Core modules implementing the request wire types, domain model, and error modeling.
pub mod error;
pub mod format;
pub mod model;
pub mod request;
