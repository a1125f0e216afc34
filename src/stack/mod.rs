//! Resolution of deferred work.
//!
//! Mutations never process deaths inline. They queue work on the
//! `DelayedQueue`, which the outermost mutation drains when it ends.

pub mod delayed;

pub use delayed::{Deferred, DelayedQueue};
