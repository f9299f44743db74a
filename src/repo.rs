pub mod model;
pub mod redb;
pub mod session;

pub use model::Repository;
pub use session::SessionStore;
