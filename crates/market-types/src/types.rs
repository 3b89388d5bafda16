//! Core domain types for the marketplace client.
//!
//! These mirror the JSON documents the backend produces (camelCase field
//! names, SCREAMING_SNAKE_CASE codes) so they can be decoded directly with
//! serde, plus the client-owned `FavoriteSet`.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

// =============================================================================
// Identifiers
// =============================================================================

/// Backend identifier of a project
pub type ProjectId = i64;

/// Backend identifier of a member (manager, freelancer, any signed-in user)
pub type MemberId = i64;

/// Backend identifier of a proposal
pub type ProposalId = i64;

// =============================================================================
// Facet domains
// =============================================================================

/// Work area of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectField {
    Planning,
    Design,
    Development,
}

/// How the freelancer is engaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecruitmentType {
    /// Remote, deliverable-based contract
    ProjectContract,
    /// On-site contract
    PersonalContract,
}

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Recruiting,
    Contracting,
    InProgress,
    Completed,
    Suspended,
    Cancelled,
}

impl ProjectStatus {
    /// All statuses in the order they are presented
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Recruiting,
        ProjectStatus::Contracting,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Suspended,
        ProjectStatus::Cancelled,
    ];
}

/// Budget bracket of a project (amounts in KRW, 만원 = 10,000 won)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetType {
    #[serde(rename = "RANGE_1_100")]
    Range1To100,
    #[serde(rename = "RANGE_100_200")]
    Range100To200,
    #[serde(rename = "RANGE_200_300")]
    Range200To300,
    #[serde(rename = "RANGE_300_500")]
    Range300To500,
    #[serde(rename = "RANGE_500_1000")]
    Range500To1000,
    #[serde(rename = "RANGE_1000_2000")]
    Range1000To2000,
    #[serde(rename = "RANGE_2000_3000")]
    Range2000To3000,
    #[serde(rename = "RANGE_3000_5000")]
    Range3000To5000,
    #[serde(rename = "RANGE_5000_OVER")]
    Range5000Over,
    #[serde(rename = "OVER_1_EUK")]
    Over1Euk,
    #[serde(rename = "NEGOTIABLE")]
    Negotiable,
}

/// Region a company is located in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    Seoul,
    Gyeonggi,
    Incheon,
    Gangwon,
    Chungnam,
    Daejeon,
    Chungbuk,
    Sejong,
    Busan,
    Ulsan,
    Daegu,
    Gyeongbuk,
    Gyeongnam,
    Jeonnam,
    Gwangju,
    Jeonbuk,
    Jeju,
    Overseas,
}

// =============================================================================
// Projects
// =============================================================================

/// A project as returned by the listing endpoints.
///
/// Every field is optional on the wire; missing values decode to their
/// defaults instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub title: String,
    pub description: Option<String>,
    pub project_field: Option<ProjectField>,
    pub recruitment_type: Option<RecruitmentType>,
    pub budget_type: Option<BudgetType>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub applicant_count: Option<u32>,
    pub company_location: Option<Location>,
    pub manager_id: Option<MemberId>,
}

impl Project {
    /// Minimal project with only an id and title, handy for tests and fixtures
    pub fn with_id(id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Anything that may carry a project id.
///
/// The favorite sort policy only needs this much of an item.
pub trait Identified {
    fn project_id(&self) -> Option<ProjectId>;
}

impl Identified for Project {
    fn project_id(&self) -> Option<ProjectId> {
        self.id
    }
}

impl Identified for ProjectId {
    fn project_id(&self) -> Option<ProjectId> {
        Some(*self)
    }
}

// =============================================================================
// Pages
// =============================================================================

/// One page of a paginated listing.
///
/// Wire shape is Spring's page envelope: `{content, totalPages, number}`.
/// Item order is page-relative and stops being meaningful once a page has
/// been re-sorted on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "content", default)]
    pub items: Vec<T>,
    #[serde(rename = "number", default)]
    pub page_index: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_index: 0,
            total_pages: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_index: u32, total_pages: u32) -> Self {
        Self {
            items,
            page_index,
            total_pages,
        }
    }

    /// Verify `page_index < total_pages` whenever there is at least one page.
    pub fn check_bounds(&self) -> Result<()> {
        if self.total_pages > 0 && self.page_index >= self.total_pages {
            return Err(ClientError::Decode(format!(
                "page index {} out of range for {} pages",
                self.page_index, self.total_pages
            )));
        }
        Ok(())
    }

    /// 1-based page number as shown to the user
    pub fn display_number(&self) -> u32 {
        self.page_index + 1
    }

    /// Replace the items, keeping the pagination data.
    pub fn with_items(self, items: Vec<T>) -> Self {
        Self {
            items,
            page_index: self.page_index,
            total_pages: self.total_pages,
        }
    }
}

impl<T: Identified> Page<T> {
    /// Ids of the items on this page, in page order (items without an id are skipped)
    pub fn ids(&self) -> Vec<ProjectId> {
        self.items.iter().filter_map(Identified::project_id).collect()
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// The set of favorited project ids of one user.
///
/// An unauthenticated session has an empty set with no owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    owner: Option<MemberId>,
    ids: HashSet<ProjectId>,
}

impl FavoriteSet {
    /// Empty set with no owner
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the set of `owner` from any list of ids (duplicates collapse).
    pub fn for_user(owner: MemberId, ids: impl IntoIterator<Item = ProjectId>) -> Self {
        Self {
            owner: Some(owner),
            ids: ids.into_iter().collect(),
        }
    }

    pub fn owner(&self) -> Option<MemberId> {
        self.owner
    }

    pub fn contains(&self, id: ProjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Apply a single toggle: add when `is_favorite`, otherwise remove.
    ///
    /// Applying the same toggle twice leaves the set unchanged after the first.
    pub fn apply_toggle(&mut self, id: ProjectId, is_favorite: bool) {
        if is_favorite {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    /// Ids in ascending order, for stable output and cache writes
    pub fn to_sorted_vec(&self) -> Vec<ProjectId> {
        let mut ids: Vec<ProjectId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

// =============================================================================
// Proposals
// =============================================================================

/// Status of a proposal sent from a project manager to a freelancer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

/// A proposal as listed in the inbox/outbox.
///
/// Timestamps are kept as the backend's strings; the client only displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub project_id: ProjectId,
    pub project_title: String,
    pub pm_id: MemberId,
    pub pm_name: String,
    pub freelancer_id: MemberId,
    pub freelancer_name: String,
    pub message: String,
    pub status: ProposalStatus,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub response_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
