//! Admin and landing-page core for the Bersekolah scholarship program.
//!
//! Backend applicant records arrive in more than one shape; [`applicant`]
//! folds them into one canonical record, [`view`] owns the loading, error and
//! selection state of the admin pages, and [`toast`] reports the outcome of
//! mutations. [`api`] talks to the REST backend and [`repo`] keeps the login
//! session between runs.

pub mod api;
pub mod applicant;
pub mod auth;
pub mod config;
pub mod repo;
pub mod toast;
pub mod view;
