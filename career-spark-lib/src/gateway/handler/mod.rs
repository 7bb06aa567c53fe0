pub mod gate;
pub mod request;
pub mod routes;

pub use gate::{check_access, Access, Admission};
pub use request::{error_into_response, handle_api_request};
