//! Infrastructure layer: concrete data access and wire formats.

pub mod dto;
pub mod repository;
