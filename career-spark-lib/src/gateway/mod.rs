pub mod connection;
pub mod handler;
pub mod http_result;
pub mod response;
pub mod server;
pub mod state;

pub use handler::handle_api_request;
pub use http_result::{HttpError, HttpResult};
pub use server::{run, serve};
pub use state::AppState;
