//! Generic filter / sort / paginate engine shared by every list endpoint
//!
//! Each record kind declares a static filter table ([`FilterRule`]s) naming the
//! query parameters it understands and the field each one applies to. The
//! engine compiles the active parameters of a request into predicates once,
//! ANDs them across rules, then sorts and slices the survivors.
//!
//! ```rust,ignore
//! const USER_FILTERS: &[FilterRule] = &[
//!     FilterRule::new(&["search"], FilterKind::Search(&["name", "nickname", "phone"])),
//!     FilterRule::new(&["category", "categories"], FilterKind::OneOf("category")),
//!     FilterRule::new(&["dateFrom"], FilterKind::DateFrom("joinDate")),
//! ];
//!
//! let page = ListQueryEngine::<User>::new(&params).run(store.list().await?);
//! ```

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::core::query::{ListParams, Page, SortSpec};
use crate::core::record::{FieldValue, Queryable};

/// How a filter parameter is applied to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive substring match; passes if ANY listed field contains the term
    Search(&'static [&'static str]),
    /// Comma-separated list of accepted values (OR within the list)
    OneOf(&'static str),
    /// Single accepted value
    Exact(&'static str),
    /// Field date is on or after the given `YYYY-MM-DD`
    DateFrom(&'static str),
    /// Field date is on or before the given `YYYY-MM-DD`
    DateTo(&'static str),
    /// Field date equals the given `YYYY-MM-DD`
    OnDate(&'static str),
    /// Field boolean equals `true` / `false`
    Flag(&'static str),
}

/// One row of a record kind's filter table
#[derive(Debug, Clone, Copy)]
pub struct FilterRule {
    /// Query parameter names feeding this rule; aliases are unioned
    pub params: &'static [&'static str],
    pub kind: FilterKind,
}

impl FilterRule {
    pub const fn new(params: &'static [&'static str], kind: FilterKind) -> Self {
        Self { params, kind }
    }
}

/// A rule bound to the values of the current request
#[derive(Debug, Clone)]
enum Predicate {
    Contains {
        fields: &'static [&'static str],
        needle: String,
    },
    OneOf {
        field: &'static str,
        values: Vec<String>,
    },
    DateFrom(&'static str, NaiveDate),
    DateTo(&'static str, NaiveDate),
    OnDate(&'static str, NaiveDate),
    Flag(&'static str, bool),
}

impl Predicate {
    fn compile(rule: &FilterRule, params: &ListParams) -> Option<Self> {
        let mut raw = rule.params.iter().filter_map(|name| params.filter(name));

        match rule.kind {
            FilterKind::Search(fields) => raw.next().map(|term| Predicate::Contains {
                fields,
                needle: term.to_lowercase(),
            }),
            FilterKind::OneOf(field) => {
                let values: Vec<String> = raw
                    .flat_map(|v| v.split(','))
                    .map(|v| v.trim().to_lowercase())
                    .filter(|v| !v.is_empty() && v != "all")
                    .collect();
                (!values.is_empty()).then_some(Predicate::OneOf { field, values })
            }
            FilterKind::Exact(field) => raw.next().map(|v| Predicate::OneOf {
                field,
                values: vec![v.to_lowercase()],
            }),
            FilterKind::DateFrom(field) => {
                raw.find_map(parse_date).map(|d| Predicate::DateFrom(field, d))
            }
            FilterKind::DateTo(field) => raw.find_map(parse_date).map(|d| Predicate::DateTo(field, d)),
            FilterKind::OnDate(field) => raw.find_map(parse_date).map(|d| Predicate::OnDate(field, d)),
            FilterKind::Flag(field) => raw
                .find_map(|v| match v.to_ascii_lowercase().as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                })
                .map(|b| Predicate::Flag(field, b)),
        }
    }

    fn matches<T: Queryable>(&self, item: &T) -> bool {
        match self {
            Predicate::Contains { fields, needle } => fields.iter().any(|f| {
                item.field(f)
                    .is_some_and(|v| v.as_text().to_lowercase().contains(needle.as_str()))
            }),
            Predicate::OneOf { field, values } => item.field(field).is_some_and(|v| {
                let text = v.as_text().to_lowercase();
                values.iter().any(|accepted| *accepted == text)
            }),
            Predicate::DateFrom(field, from) => date_of(item, field).is_some_and(|d| d >= *from),
            Predicate::DateTo(field, to) => date_of(item, field).is_some_and(|d| d <= *to),
            Predicate::OnDate(field, on) => date_of(item, field).is_some_and(|d| d == *on),
            Predicate::Flag(field, expected) => item
                .field(field)
                .and_then(|v| v.as_bool())
                .is_some_and(|b| b == *expected),
        }
    }
}

fn date_of<T: Queryable>(item: &T, field: &str) -> Option<NaiveDate> {
    item.field(field).and_then(|v| v.as_date())
}

/// Parse `YYYY-MM-DD`, also accepting a longer ISO timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn compare_fields(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>, descending: bool) -> Ordering {
    let ordering = match (a, b) {
        (None, None) => return Ordering::Equal,
        // Missing values always go last
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => x.cmp(&y),
        (Some(FieldValue::Date(x)), Some(FieldValue::Date(y))) => x.cmp(&y),
        (Some(FieldValue::Bool(x)), Some(FieldValue::Bool(y))) => x.cmp(&y),
        (Some(x), Some(y)) => x.as_text().cmp(&y.as_text()),
    };
    if descending { ordering.reverse() } else { ordering }
}

/// Filter, sort and paginate a collection of `T`
pub struct ListQueryEngine<'p, T> {
    params: &'p ListParams,
    predicates: Vec<Predicate>,
    _marker: PhantomData<fn() -> T>,
}

impl<'p, T: Queryable> ListQueryEngine<'p, T> {
    /// Compile the active filters of `params` against `T`'s filter table
    pub fn new(params: &'p ListParams) -> Self {
        let predicates = T::filters()
            .iter()
            .filter_map(|rule| Predicate::compile(rule, params))
            .collect::<Vec<_>>();

        tracing::debug!(
            resource = T::resource_name(),
            active_filters = predicates.len(),
            "compiled list query"
        );

        Self {
            params,
            predicates,
            _marker: PhantomData,
        }
    }

    /// Whether a record passes every active filter
    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }

    /// Filtered and sorted items, before pagination
    pub fn filter(&self, items: Vec<T>) -> Vec<T> {
        let mut filtered: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();
        if let Some(sort) = &self.params.sort {
            Self::sort(&mut filtered, sort);
        }
        filtered
    }

    /// Stable sort on a declared sort field; unknown fields keep collection order
    pub fn sort(items: &mut [T], sort: &SortSpec) {
        if !T::sort_fields().contains(&sort.field.as_str()) {
            return;
        }
        items.sort_by(|a, b| compare_fields(a.field(&sort.field), b.field(&sort.field), sort.descending));
    }

    /// Filter, sort and cut the requested page
    pub fn run(&self, items: Vec<T>) -> Page<T> {
        Page::paginate(self.filter(items), self.params)
    }
}
