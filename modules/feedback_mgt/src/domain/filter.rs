//! Filter expressions of the form `<attribute> <operator> <value>`.
//!
//! Attribute and operator keywords are matched case-insensitively; the value is
//! kept verbatim. A missing or blank expression means "no filter".

use std::fmt;

use modkit_db::like;

use crate::domain::error::DomainError;

/// Attributes a listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAttribute {
    Email,
    Tag,
}

impl FilterAttribute {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("email") {
            Some(Self::Email)
        } else if s.eq_ignore_ascii_case("tag") {
            Some(Self::Tag)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// `eq`
    Equals,
    /// `sw`
    StartsWith,
    /// `ew`
    EndsWith,
    /// `co`
    Contains,
}

impl FilterOperator {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Some(Self::Equals),
            "sw" => Some(Self::StartsWith),
            "ew" => Some(Self::EndsWith),
            "co" => Some(Self::Contains),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::StartsWith => "sw",
            Self::EndsWith => "ew",
            Self::Contains => "co",
        }
    }
}

/// A validated filter: one attribute, one operator, one literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub attribute: FilterAttribute,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn new(attribute: FilterAttribute, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            attribute,
            operator,
            value: value.into(),
        }
    }

    /// LIKE pattern for this clause; literal wildcards in `value` are escaped
    /// with [`like::LIKE_ESCAPE`].
    pub fn pattern(&self) -> String {
        match self.operator {
            FilterOperator::Equals => like::exact(&self.value),
            FilterOperator::StartsWith => like::starts_with(&self.value),
            FilterOperator::EndsWith => like::ends_with(&self.value),
            FilterOperator::Contains => like::contains(&self.value),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.attribute,
            self.operator.as_str(),
            self.value
        )
    }
}

/// Parse a filter expression.
///
/// Returns `Ok(None)` for a missing or blank expression. Anything else must split
/// into exactly three whitespace-separated tokens.
pub fn parse_filter(filter: Option<&str>) -> Result<Option<FilterClause>, DomainError> {
    let raw = match filter.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let [attribute, operator, value] = tokens.as_slice() else {
        return Err(DomainError::invalid_filter_syntax(raw));
    };

    let attribute = FilterAttribute::parse(attribute)
        .ok_or_else(|| DomainError::unsupported_filter_attribute(*attribute))?;
    let operator = FilterOperator::parse(operator)
        .ok_or_else(|| DomainError::unsupported_filter_operation(*operator))?;

    Ok(Some(FilterClause::new(attribute, operator, *value)))
}
