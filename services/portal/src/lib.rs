pub mod adapters;
pub mod bridge;
pub mod config;
pub mod error;
pub mod events;
pub mod portal;
pub mod views;

pub use portal::Portal;
