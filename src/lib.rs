//! In-memory REST resource for book records

pub mod book;
pub mod config;
pub mod resource;
pub mod server;
pub mod store;
pub mod util;

pub use book::Book;
pub use server::Server;
pub use store::{BookStore, StoreError};
