pub mod clients;
pub mod config;
pub mod dashboard;
pub mod deserializers;
pub mod error;
pub mod export;
pub mod grid;
pub mod models;
pub mod prompts;
pub mod responses;
pub mod schemas;
pub mod session;

pub use error::{MandalaError, Result};
pub use models::{ChecklistItem, MandalaResult, SubGrid};
