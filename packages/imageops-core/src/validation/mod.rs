pub mod params;
pub mod request;

pub use params::{validate_token, Params};
pub use request::ProcessingRequest;
