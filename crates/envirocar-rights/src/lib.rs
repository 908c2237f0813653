//! # envirocar-rights
//!
//! Access rights for enviroCar.
//!
//! Every visibility and mutation check goes through one dispatcher,
//! [`authorize`], which judges a [`Permission`] on a [`Target`] for a
//! viewer. [`AccessRights`] binds a viewer to the friend and group services
//! for the duration of one request.

pub mod permission;
pub mod policy;
pub mod rights;

pub use permission::{Audience, Permission};
pub use policy::{authorize, Relations, Target};
pub use rights::AccessRights;
