//! Scope sets, grant types, and the bearer token model.

pub mod grant;
pub mod scope;
pub mod token;

pub use grant::*;
pub use scope::*;
pub use token::{record::*, secret::*};
