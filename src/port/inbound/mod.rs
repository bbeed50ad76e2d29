//! Inbound ports: what the application offers to callers.

pub mod recommend;
