//! Domain types and the ports the application layer depends on.

pub mod customer;
pub mod payment;
pub mod ports;
