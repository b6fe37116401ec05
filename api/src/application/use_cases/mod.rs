pub mod polls;
pub mod topics;
