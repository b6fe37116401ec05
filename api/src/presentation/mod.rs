pub mod http;
pub mod topics;
