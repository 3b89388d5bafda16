//! # Market Types Crate
//!
//! Domain vocabulary shared by every crate of the marketplace client.
//!
//! ## Main Components
//!
//! - **types**: Projects, proposals, page envelopes and the `FavoriteSet`
//! - **codes**: Wire codes and Korean display labels for the filter facets
//! - **session**: The signed-in user as the pages see it
//! - **error**: The `ClientError` taxonomy used across crates
//!
//! ## Example Usage
//!
//! ```ignore
//! use market_types::{Page, Project, ProjectStatus};
//!
//! let page: Page<Project> = serde_json::from_str(body)?;
//! page.check_bounds()?;
//!
//! let status: ProjectStatus = "모집중".parse()?;
//! println!("{} -> {}", status.label(), status.code());
//! ```

// Public modules
pub mod codes;
pub mod error;
pub mod session;
pub mod types;

// Re-export commonly used types for convenience
pub use codes::{budget_label, d_day_label};
pub use error::{ClientError, Result};
pub use session::Session;
pub use types::{
    // Identifiers
    MemberId,
    ProjectId,
    ProposalId,
    // Core types
    FavoriteSet,
    Identified,
    Page,
    Project,
    Proposal,
    // Enums
    BudgetType,
    Location,
    ProjectField,
    ProjectStatus,
    ProposalStatus,
    RecruitmentType,
};
