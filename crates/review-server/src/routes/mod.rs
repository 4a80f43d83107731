pub mod board;
pub mod data;
pub mod proposals;
pub mod user;
