pub mod client;
pub mod error;
pub mod media;
pub mod model;
pub mod proxy;

pub use client::{Client, ClientResult};
pub use error::Error;
