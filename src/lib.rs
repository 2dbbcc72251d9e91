//! Magnetic fields of circular current loops.
//!
//! The field of each loop is computed in closed form, with complete elliptic integrals, in a
//! frame attached to the loop; fields of several loops are superposed.

pub mod configuration;
pub mod error;
pub mod frame;
pub mod magnetic;
pub mod maths;
pub mod output;

pub use error::{Error, FieldError};
pub use frame::{build_frame, Frame};
pub use magnetic::{field_of_loop, total_field, CurrentLoop};
