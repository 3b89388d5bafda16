//! Wire codes and display labels for the facet domains.
//!
//! Each facet value has:
//! - a wire code (`RECRUITING`, `RANGE_1_100`, `SEOUL`, ...) that the
//!   backend understands
//! - a Korean display label (`모집중`, `1만원 ~ 100만원`, `서울`, ...)
//!
//! Parsing accepts either form, so a code typed on the command line and a
//! label picked from a filter panel end up as the same value. Codes are
//! matched case-insensitively and `-` is accepted in place of `_`.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{ClientError, Result};
use crate::types::*;

/// Label shown when a project has no budget bracket
pub const UNDECIDED_BUDGET_LABEL: &str = "미정";

/// Label shown once a project's end date has passed
pub const CLOSED_LABEL: &str = "마감";

/// Normalize user input to the wire-code form: trimmed, uppercase, `_` separators
fn normalize_code(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

/// Find the value whose code or label matches `s`.
fn parse_coded<T: Copy>(
    field: &str,
    s: &str,
    values: &[T],
    code: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Result<T> {
    let normalized = normalize_code(s);
    let trimmed = s.trim();
    values
        .iter()
        .copied()
        .find(|value| code(*value) == normalized || label(*value) == trimmed)
        .ok_or_else(|| ClientError::invalid_value(field, s))
}

// =============================================================================
// ProjectField
// =============================================================================

impl ProjectField {
    pub const ALL: [ProjectField; 3] = [
        ProjectField::Planning,
        ProjectField::Design,
        ProjectField::Development,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ProjectField::Planning => "PLANNING",
            ProjectField::Design => "DESIGN",
            ProjectField::Development => "DEVELOPMENT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectField::Planning => "기획",
            ProjectField::Design => "디자인",
            ProjectField::Development => "개발",
        }
    }
}

impl FromStr for ProjectField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coded("projectField", s, &Self::ALL, Self::code, Self::label)
    }
}

// =============================================================================
// RecruitmentType
// =============================================================================

impl RecruitmentType {
    pub const ALL: [RecruitmentType; 2] = [
        RecruitmentType::ProjectContract,
        RecruitmentType::PersonalContract,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RecruitmentType::ProjectContract => "PROJECT_CONTRACT",
            RecruitmentType::PersonalContract => "PERSONAL_CONTRACT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecruitmentType::ProjectContract => "외주",
            RecruitmentType::PersonalContract => "상주",
        }
    }
}

impl FromStr for RecruitmentType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coded("recruitmentType", s, &Self::ALL, Self::code, Self::label)
    }
}

// =============================================================================
// ProjectStatus
// =============================================================================

impl ProjectStatus {
    pub fn code(self) -> &'static str {
        match self {
            ProjectStatus::Recruiting => "RECRUITING",
            ProjectStatus::Contracting => "CONTRACTING",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Suspended => "SUSPENDED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Recruiting => "모집중",
            ProjectStatus::Contracting => "계약중",
            ProjectStatus::InProgress => "진행중",
            ProjectStatus::Completed => "완료",
            ProjectStatus::Suspended => "보류",
            ProjectStatus::Cancelled => "취소",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coded("status", s, &Self::ALL, Self::code, Self::label)
    }
}

// =============================================================================
// BudgetType
// =============================================================================

impl BudgetType {
    pub const ALL: [BudgetType; 11] = [
        BudgetType::Range1To100,
        BudgetType::Range100To200,
        BudgetType::Range200To300,
        BudgetType::Range300To500,
        BudgetType::Range500To1000,
        BudgetType::Range1000To2000,
        BudgetType::Range2000To3000,
        BudgetType::Range3000To5000,
        BudgetType::Range5000Over,
        BudgetType::Over1Euk,
        BudgetType::Negotiable,
    ];

    pub fn code(self) -> &'static str {
        match self {
            BudgetType::Range1To100 => "RANGE_1_100",
            BudgetType::Range100To200 => "RANGE_100_200",
            BudgetType::Range200To300 => "RANGE_200_300",
            BudgetType::Range300To500 => "RANGE_300_500",
            BudgetType::Range500To1000 => "RANGE_500_1000",
            BudgetType::Range1000To2000 => "RANGE_1000_2000",
            BudgetType::Range2000To3000 => "RANGE_2000_3000",
            BudgetType::Range3000To5000 => "RANGE_3000_5000",
            BudgetType::Range5000Over => "RANGE_5000_OVER",
            BudgetType::Over1Euk => "OVER_1_EUK",
            BudgetType::Negotiable => "NEGOTIABLE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetType::Range1To100 => "1만원 ~ 100만원",
            BudgetType::Range100To200 => "100만원 ~ 200만원",
            BudgetType::Range200To300 => "200만원 ~ 300만원",
            BudgetType::Range300To500 => "300만원 ~ 500만원",
            BudgetType::Range500To1000 => "500만원 ~ 1000만원",
            BudgetType::Range1000To2000 => "1000만원 ~ 2000만원",
            BudgetType::Range2000To3000 => "2000만원 ~ 3000만원",
            BudgetType::Range3000To5000 => "3000만원 ~ 5000만원",
            BudgetType::Range5000Over => "5000만원 ~ 1억",
            BudgetType::Over1Euk => "1억 이상",
            BudgetType::Negotiable => "협의",
        }
    }
}

impl FromStr for BudgetType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coded("budgetType", s, &Self::ALL, Self::code, Self::label)
    }
}

/// Label for an optional budget, `미정` when absent
pub fn budget_label(budget: Option<BudgetType>) -> &'static str {
    budget.map_or(UNDECIDED_BUDGET_LABEL, BudgetType::label)
}

// =============================================================================
// Location
// =============================================================================

impl Location {
    pub const ALL: [Location; 18] = [
        Location::Seoul,
        Location::Gyeonggi,
        Location::Incheon,
        Location::Gangwon,
        Location::Chungnam,
        Location::Daejeon,
        Location::Chungbuk,
        Location::Sejong,
        Location::Busan,
        Location::Ulsan,
        Location::Daegu,
        Location::Gyeongbuk,
        Location::Gyeongnam,
        Location::Jeonnam,
        Location::Gwangju,
        Location::Jeonbuk,
        Location::Jeju,
        Location::Overseas,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Location::Seoul => "SEOUL",
            Location::Gyeonggi => "GYEONGGI",
            Location::Incheon => "INCHEON",
            Location::Gangwon => "GANGWON",
            Location::Chungnam => "CHUNGNAM",
            Location::Daejeon => "DAEJEON",
            Location::Chungbuk => "CHUNGBUK",
            Location::Sejong => "SEJONG",
            Location::Busan => "BUSAN",
            Location::Ulsan => "ULSAN",
            Location::Daegu => "DAEGU",
            Location::Gyeongbuk => "GYEONGBUK",
            Location::Gyeongnam => "GYEONGNAM",
            Location::Jeonnam => "JEONNAM",
            Location::Gwangju => "GWANGJU",
            Location::Jeonbuk => "JEONBUK",
            Location::Jeju => "JEJU",
            Location::Overseas => "OVERSEAS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Location::Seoul => "서울",
            Location::Gyeonggi => "경기",
            Location::Incheon => "인천",
            Location::Gangwon => "강원",
            Location::Chungnam => "충남",
            Location::Daejeon => "대전",
            Location::Chungbuk => "충북",
            Location::Sejong => "세종",
            Location::Busan => "부산",
            Location::Ulsan => "울산",
            Location::Daegu => "대구",
            Location::Gyeongbuk => "경북",
            Location::Gyeongnam => "경남",
            Location::Jeonnam => "전남",
            Location::Gwangju => "광주",
            Location::Jeonbuk => "전북",
            Location::Jeju => "제주",
            Location::Overseas => "국외",
        }
    }

    /// Look a region up by its display label only (`서울` -> `Seoul`).
    pub fn from_label(label: &str) -> Option<Location> {
        let label = label.trim();
        Self::ALL.iter().copied().find(|l| l.label() == label)
    }
}

impl FromStr for Location {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coded("location", s, &Self::ALL, Self::code, Self::label)
    }
}

// =============================================================================
// Deadlines
// =============================================================================

/// D-day label for a project's end date relative to `today`.
///
/// `D-n` while the end date is n > 0 days ahead, `마감` on or after it.
pub fn d_day_label(end_date: NaiveDate, today: NaiveDate) -> String {
    let days = (end_date - today).num_days();
    if days > 0 {
        format!("D-{days}")
    } else {
        CLOSED_LABEL.to_string()
    }
}
