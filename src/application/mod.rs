//! Application layer containing the use-case services.
//!
//! `CustomerRegistrar` onboards customers and `PaymentProcessor` charges their
//! cards. Both take their collaborators as boxed ports at construction time
//! and hold no mutable state of their own.

pub mod payment;
pub mod registration;

pub use payment::PaymentProcessor;
pub use registration::{CustomerRegistrar, Registration};
