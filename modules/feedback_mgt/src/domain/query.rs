//! Resolution of raw listing parameters into a validated [`ListPlan`].

use crate::contract::model::FeedbackQuery;
use crate::domain::error::DomainError;
use crate::domain::filter::{parse_filter, FilterClause};

/// Attributes a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAttribute {
    #[default]
    TimeCreated,
}

impl SortAttribute {
    /// Blank input selects the default attribute.
    pub fn resolve(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) if s.eq_ignore_ascii_case("time_created") => Ok(Self::TimeCreated),
            Some(s) => Err(DomainError::unsupported_sort_attribute(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Blank input selects ascending order.
    pub fn resolve(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) if s.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            Some(s) if s.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            Some(s) => Err(DomainError::invalid_sort_order(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    /// `limit == 0` selects `default_limit`; negative values are rejected.
    pub fn resolve(limit: i64, offset: i64, default_limit: u64) -> Result<Self, DomainError> {
        let limit = match u64::try_from(limit) {
            Ok(0) => default_limit,
            Ok(n) => n,
            Err(_) => return Err(DomainError::InvalidLimit { limit }),
        };
        let offset =
            u64::try_from(offset).map_err(|_| DomainError::InvalidOffset { offset })?;
        Ok(Self { limit, offset })
    }
}

/// Everything the store needs to run one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    pub filter: Option<FilterClause>,
    pub page: Pagination,
    pub sort_by: SortAttribute,
    pub order: SortOrder,
}

impl ListPlan {
    /// Validate in order: limit, offset, sort attribute, sort order, filter.
    /// The first failure wins.
    pub fn resolve(query: &FeedbackQuery, default_limit: u64) -> Result<Self, DomainError> {
        let page = Pagination::resolve(query.limit, query.offset, default_limit)?;
        let sort_by = SortAttribute::resolve(query.sort_by.as_deref())?;
        let order = SortOrder::resolve(query.sort_order.as_deref())?;
        let filter = parse_filter(query.filter.as_deref())?;
        Ok(Self {
            filter,
            page,
            sort_by,
            order,
        })
    }
}
