pub mod action;
pub mod aggregate;
pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod io;
pub mod order;
pub mod paths;
pub mod proposal;
pub mod rating;
pub mod store;

pub use error::{Result, ReviewError};
