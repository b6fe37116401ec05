pub mod health;
pub mod polls;
pub mod topics;
