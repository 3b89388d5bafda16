//! Page controllers of the marketplace client.
//!
//! This crate contains the controllers that coordinate filter state, the
//! backend client and the favorites sync for each page.

pub mod manager_projects;
pub mod notice;
pub mod project_list;
pub mod proposals;

pub use manager_projects::ManagerProjectsController;
pub use notice::{Notices, UiEffect};
pub use project_list::{Pagination, ProjectListController, Trigger};
pub use proposals::{ChatTarget, ProposalInbox, ResponseKind, ResponseModal, Viewer};
