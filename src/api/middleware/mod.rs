//! API middleware. Only the audit logger: the API binds to loopback
//! and carries no credentials.

pub mod audit;
