//! Record traits defining the core abstraction for all listed data types

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

use crate::core::engine::FilterRule;

/// Base trait for every record kind held in a collection.
///
/// Records are flat, keyed by a numeric id that is unique within their
/// collection, and serialize to the camelCase JSON the dashboard consumes.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name used in URLs (e.g., "settlements")
    fn resource_name() -> &'static str;

    /// The singular resource name used in messages (e.g., "settlement")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier of this record
    fn id(&self) -> u64;
}

/// Records that can be filtered, sorted and paginated by the list engine.
///
/// Implementors expose their fields by name through [`Queryable::field`] and
/// declare which query parameters filter which fields in [`Queryable::filters`].
pub trait Queryable: Record {
    /// The filter table of this record kind
    fn filters() -> &'static [FilterRule];

    /// Field names accepted by `sort=<field>[:asc|:desc]`
    fn sort_fields() -> &'static [&'static str] {
        &[]
    }

    /// Read a field by name, derived fields included
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// A field value read from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(i64),
    Date(NaiveDate),
    Bool(bool),
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Owned text value, for values formatted on the fly
    pub fn text_owned(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }

    /// Text rendering used by substring search and list membership
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Get the value as a date if possible
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
