// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres and in-memory poll stores
// - presentation: HTTP handlers and topic view models
// - application: ports, use cases and form state
// - domain: polls and topics

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
