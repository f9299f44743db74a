pub mod landing;
pub mod list;
pub mod state;

pub use list::{ApplicantSource, ListController};
pub use state::{DetailState, Filters, Phase, TableView, ViewState};
