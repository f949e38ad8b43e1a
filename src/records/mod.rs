pub mod bmi;
mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

#[cfg(test)]
pub(crate) mod memory;

pub use repo::PgRecordStore;
