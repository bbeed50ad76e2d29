//! Application services (use cases).
//!
//! [`mining`] builds rule sets from transaction logs; [`recommend`] serves
//! them.

pub mod mining;
pub mod recommend;
