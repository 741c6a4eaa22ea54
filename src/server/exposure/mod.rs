//! Protocol exposures of the entity registry

pub mod rest;

pub use rest::RestExposure;
