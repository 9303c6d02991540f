//! Shared core of the BiasFinder photocard catalog front-ends.
//!
//! The backend owns every record. This crate provides the [`Api`] client used to reach it and
//! the view state each page keeps between requests: the paginated [`Catalog`], the user's
//! [`Collection`], the admin [`ModerationQueue`] and the [`ProposalForm`]. The view state types
//! never perform I/O themselves, they hand out requests and take back results, so the GUI and
//! CLI drive them the same way.

pub mod api;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod entities;
pub mod fs;
pub mod moderation;
pub mod proposal;

mod error;

pub use api::Api;
pub use catalog::Catalog;
pub use collection::Collection;
pub use error::{Error, Result};
pub use moderation::ModerationQueue;
pub use proposal::ProposalForm;
