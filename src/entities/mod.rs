//! Entity definitions and the macro that generates them

#[macro_use]
pub mod macros;
pub mod module;
pub mod school;

pub use module::SchoolModule;
