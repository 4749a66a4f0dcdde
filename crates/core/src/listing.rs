//! In-memory filter → sort → paginate pipeline.
//!
//! Every listable kind (modules, entities, table attributes) runs through
//! [`paginate`]. A kind only has to describe itself:
//!
//! - a [`Filter`] implementation for its filter DTO,
//! - a [`Sortable`] implementation mapping wire field names to values.
//!
//! `total` is always counted after filtering and before slicing, so
//! `paginas = ceil(total / size)` holds for every page, including pages past
//! the end (which come back empty).

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, Timestamp};

/// Page used when the caller does not send one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller does not send one.
pub const DEFAULT_SIZE: u64 = 10;

/// Sort key applied when no sorting is requested: newest first.
pub const DEFAULT_SORT_FIELD: &str = "fechaCreacion";

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ordered mapping of wire field name to direction. Keys are compared in
/// insertion order.
pub type Sorting = IndexMap<String, SortDirection>;

/// A comparable field value extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Flag(bool),
    Time(Timestamp),
}

impl SortValue<'_> {
    /// Compare two values of the same kind. Values of different kinds are
    /// not comparable.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Flag(a), Self::Flag(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Records that expose named fields to the sorter.
///
/// Returning `None` (unknown field, or an unset optional value) makes the
/// sorter skip that key for the pair being compared.
pub trait Sortable {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>>;
}

/// Sort `items` in place. `None` means the default sort; an empty map keeps
/// the stored order. The sort is stable.
pub fn sort_items<T: Sortable>(items: &mut [T], sorting: Option<&Sorting>) {
    let keys: Vec<(&str, SortDirection)> = match sorting {
        Some(sorting) => sorting.iter().map(|(f, d)| (f.as_str(), *d)).collect(),
        None => vec![(DEFAULT_SORT_FIELD, SortDirection::Desc)],
    };
    if keys.is_empty() {
        return;
    }

    items.sort_by(|a, b| compare_by_keys(a, b, &keys));
}

fn compare_by_keys<T: Sortable>(a: &T, b: &T, keys: &[(&str, SortDirection)]) -> Ordering {
    for (field, direction) in keys {
        let (Some(left), Some(right)) = (a.sort_value(field), b.sort_value(field)) else {
            continue;
        };
        match left.compare(&right) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => {
                return match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
            }
        }
    }
    Ordering::Equal
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// A conjunction of optional predicates over `T`.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Filter that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl<T> Filter<T> for MatchAll {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Case-insensitive substring match. An absent or empty needle matches.
pub fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) if !needle.is_empty() => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => true,
    }
}

/// Exact flag match, applied only when a value was supplied.
pub fn flag_matches(actual: bool, wanted: Option<bool>) -> bool {
    match wanted {
        Some(wanted) => actual == wanted,
        None => true,
    }
}

/// Canonical id equality, applied only when an id was supplied.
pub fn id_matches(actual: Option<&ObjectId>, wanted: Option<&ObjectId>) -> bool {
    match wanted {
        Some(wanted) => actual == Some(wanted),
        None => true,
    }
}

/// True when `actual` shares at least one value with `wanted`.
pub fn intersects<T: PartialEq>(actual: &[T], wanted: Option<&[T]>) -> bool {
    match wanted {
        Some(wanted) if !wanted.is_empty() => wanted.iter().any(|w| actual.contains(w)),
        _ => true,
    }
}

/// True when `actual` contains every value of `wanted`.
pub fn superset<T: PartialEq>(actual: &[T], wanted: Option<&[T]>) -> bool {
    match wanted {
        Some(wanted) => wanted.iter().all(|w| actual.contains(w)),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Requested page, wire shape `{ "pagina": n, "size": n }`.
///
/// Both values are optional and clamped to at least 1 when read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(rename = "pagina", default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    pub fn page(&self) -> u64 {
        clamp(self.page, DEFAULT_PAGE)
    }

    pub fn size(&self) -> u64 {
        clamp(self.size, DEFAULT_SIZE)
    }

    fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.size())
    }
}

fn clamp(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) if v >= 1 => v as u64,
        Some(_) => 1,
        None => default,
    }
}

/// Pagination metadata, wire shape `{ total, pagina, size, paginas }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    #[serde(rename = "pagina")]
    pub page: u64,
    pub size: u64,
    #[serde(rename = "paginas")]
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: u64, size: u64) -> Self {
        Self {
            total,
            page,
            size,
            pages: total.div_ceil(size.max(1)),
        }
    }
}

/// One page of results, wire shape `{ response: [...], paginacion: {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "response")]
    pub items: Vec<T>,
    #[serde(rename = "paginacion")]
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Filter, sort and slice `items`.
pub fn paginate<T, F>(
    items: impl IntoIterator<Item = T>,
    filter: &F,
    sorting: Option<&Sorting>,
    request: PageRequest,
) -> Page<T>
where
    T: Sortable,
    F: Filter<T> + ?Sized,
{
    let mut matched: Vec<T> = items.into_iter().filter(|i| filter.matches(i)).collect();
    let total = matched.len() as u64;

    sort_items(&mut matched, sorting);

    let items = matched
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(request.size()).unwrap_or(usize::MAX))
        .collect();

    Page {
        items,
        pagination: Pagination::new(total, request.page(), request.size()),
    }
}
