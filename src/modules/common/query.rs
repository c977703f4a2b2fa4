//! Normalization of the listing query string.
//!
//! every parameter resolves to a valid value, unparseable or out of range
//! input silently falls back to its default instead of failing the request.

use crate::database::repository::{Page, Sort};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, Serialize, ToSchema,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Whitelist of the fields a resource listing can be sorted by,
/// parsed from their camel cased names, the default being `createdAt`.
pub trait SortField: FromStr + Default + Copy + Send + Sync + 'static {}

impl<T> SortField for T where T: FromStr + Default + Copy + Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec<F> {
    pub page_number: u64,
    pub page_size: u64,
    pub sort_by: F,
    pub sort_direction: SortDirection,
}

impl<F: SortField> QuerySpec<F> {
    /// normalizes the raw query parameters, this never fails
    pub fn normalize(params: &HashMap<String, String>) -> Self {
        QuerySpec {
            page_number: canonical_u64(params.get("pageNumber"), DEFAULT_PAGE_NUMBER),
            page_size: canonical_u64(params.get("pageSize"), DEFAULT_PAGE_SIZE),
            sort_by: params
                .get("sortBy")
                .and_then(|raw| F::from_str(raw).ok())
                .unwrap_or_default(),
            sort_direction: params
                .get("sortDirection")
                .and_then(|raw| SortDirection::from_str(raw).ok())
                .unwrap_or_default(),
        }
    }
}

impl<F: Copy> QuerySpec<F> {
    /// records to skip and take, page `0` reads as the first page
    pub fn page(&self) -> Page {
        Page {
            offset: self.page_number.saturating_sub(1).saturating_mul(self.page_size),
            limit: self.page_size,
        }
    }

    pub fn sort(&self) -> Sort<F> {
        Sort {
            by: self.sort_by,
            direction: self.sort_direction,
        }
    }
}

/// returns a search term parameter, empty when absent
pub fn search_term(params: &HashMap<String, String>, key: &str) -> String {
    params.get(key).cloned().unwrap_or_default()
}

/// parses a non negative integer written in its canonical form, so `"03"`, `"+3"`,
/// `"1.5"`, `"-1"` and `"abc"` all yield `default` while `"0"` is kept
fn canonical_u64(raw: Option<&String>, default: u64) -> u64 {
    raw.and_then(|raw| {
        raw.parse::<u64>()
            .ok()
            .filter(|n| n.to_string() == *raw)
    })
    .unwrap_or(default)
}
