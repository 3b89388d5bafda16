//! Filter state of the project listing.
//!
//! `FilterState` holds every query input of the listing (search text, the
//! five single-select facets and the page index) as one value, so a change
//! is always applied to the whole structure at once.
//!
//! ## Invariants
//! - Each facet holds at most one value.
//! - Any change other than `set_page` resets the page index to 0.
//! - Only `set_page` leaves the scroll position alone.

use market_types::{BudgetType, Location, ProjectField, ProjectStatus, RecruitmentType};
use tracing::debug;

/// One filter dimension together with its new value (`None` clears it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    ProjectField(Option<ProjectField>),
    RecruitmentType(Option<RecruitmentType>),
    Status(Option<ProjectStatus>),
    Location(Option<Location>),
    Budget(Option<BudgetType>),
}

/// What a state change asks the page to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEffect {
    /// Re-fetch and scroll the list back to the top
    FetchAndScrollTop,
    /// Re-fetch, keep the scroll position
    Fetch,
}

impl FilterEffect {
    pub fn scrolls_to_top(self) -> bool {
        matches!(self, FilterEffect::FetchAndScrollTop)
    }
}

/// Current query of the project listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    project_field: Option<ProjectField>,
    recruitment_type: Option<RecruitmentType>,
    status: Option<ProjectStatus>,
    location: Option<Location>,
    budget_range: Option<BudgetType>,
    page_index: u32,
}

impl Default for FilterState {
    /// Only recruiting projects are shown until the user picks otherwise.
    fn default() -> Self {
        Self {
            search_text: String::new(),
            project_field: None,
            recruitment_type: None,
            status: Some(ProjectStatus::Recruiting),
            location: None,
            budget_range: None,
            page_index: 0,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn project_field(&self) -> Option<ProjectField> {
        self.project_field
    }

    pub fn recruitment_type(&self) -> Option<RecruitmentType> {
        self.recruitment_type
    }

    pub fn status(&self) -> Option<ProjectStatus> {
        self.status
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn budget_range(&self) -> Option<BudgetType> {
        self.budget_range
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Replace exactly one facet and go back to the first page.
    pub fn set_filter(&mut self, facet: Facet) -> FilterEffect {
        self.apply_facet(facet);
        self.page_index = 0;
        debug!("Filter changed: {:?}", facet);
        FilterEffect::FetchAndScrollTop
    }

    /// Replace several facets as one change; the page resets exactly once.
    pub fn set_filters(&mut self, facets: impl IntoIterator<Item = Facet>) -> FilterEffect {
        for facet in facets {
            self.apply_facet(facet);
            debug!("Filter changed: {:?}", facet);
        }
        self.page_index = 0;
        FilterEffect::FetchAndScrollTop
    }

    /// Replace the free-text search and go back to the first page.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> FilterEffect {
        self.search_text = text.into();
        self.page_index = 0;
        debug!("Search text changed: {:?}", self.search_text);
        FilterEffect::FetchAndScrollTop
    }

    /// Move to another page; nothing else changes.
    pub fn set_page(&mut self, page_index: u32) -> FilterEffect {
        self.page_index = page_index;
        FilterEffect::Fetch
    }

    /// Back to the default query (recruiting projects, no search, first page).
    pub fn reset(&mut self) -> FilterEffect {
        *self = Self::default();
        FilterEffect::FetchAndScrollTop
    }

    fn apply_facet(&mut self, facet: Facet) {
        match facet {
            Facet::ProjectField(value) => self.project_field = value,
            Facet::RecruitmentType(value) => self.recruitment_type = value,
            Facet::Status(value) => self.status = value,
            Facet::Location(value) => self.location = value,
            Facet::Budget(value) => self.budget_range = value,
        }
    }

    /// Query parameters for `GET /api/projects`.
    ///
    /// Order: `page, size, search, projectField, recruitmentType, location,
    /// budgetType, status`. A blank search and unset facets are left out
    /// entirely rather than sent as empty strings. The location is sent as
    /// its region code.
    pub fn to_query(&self, page_size: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page_index.to_string()),
            ("size", page_size.to_string()),
        ];
        if !self.search_text.trim().is_empty() {
            params.push(("search", self.search_text.clone()));
        }
        if let Some(field) = self.project_field {
            params.push(("projectField", field.code().to_string()));
        }
        if let Some(recruitment) = self.recruitment_type {
            params.push(("recruitmentType", recruitment.code().to_string()));
        }
        if let Some(location) = self.location {
            params.push(("location", location.code().to_string()));
        }
        if let Some(budget) = self.budget_range {
            params.push(("budgetType", budget.code().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.code().to_string()));
        }
        params
    }
}
