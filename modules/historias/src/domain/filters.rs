//! Filter compilation: a sparse [`SearchFilters`] plus window bounds
//! become an ordered predicate list for the store.
//!
//! A field contributes a predicate only when non-empty after trimming.
//! Numeric and date fields are parsed before predicate construction;
//! malformed input is rejected locally and never reaches the store.
//! Pagination predicates always come last, and a `Limit` is always
//! emitted so no compiled query is unbounded.

use chrono::NaiveDate;
use docstore::{PageRequest, Query};

use crate::contract::model::SearchFilters;
use crate::domain::error::DomainError;

pub fn compile(
    filters: &SearchFilters,
    page: PageRequest,
) -> Result<Vec<Query>, DomainError> {
    let mut queries = Vec::new();

    if let Some(year) = parse_int("year", &filters.year)? {
        queries.push(Query::equal("year", year));
    }

    push_equal(&mut queries, "doctor_first", &filters.doctor_first);
    push_equal(&mut queries, "doctor_last", &filters.doctor_last);
    push_equal(&mut queries, "patient_first_name", &filters.patient_first_name);
    push_equal(&mut queries, "patient_last_name", &filters.patient_last_name);
    push_equal(&mut queries, "condition", &filters.condition);
    push_equal(&mut queries, "document_number", &filters.document_number);
    push_equal(&mut queries, "document_type", &filters.document_type);
    push_equal(&mut queries, "room_number", &filters.room_number);
    push_equal(&mut queries, "operation", &filters.operation);
    push_equal(&mut queries, "gender", &filters.gender);

    if let Some(from) = parse_date("from_date", &filters.from_date)? {
        queries.push(Query::greater_or_equal("admission_date", from.to_string()));
    }
    if let Some(to) = parse_date("to_date", &filters.to_date)? {
        queries.push(Query::less_or_equal("admission_date", to.to_string()));
    }
    if let Some(min) = parse_int("min_age", &filters.min_age)? {
        queries.push(Query::greater_or_equal("age", min));
    }
    if let Some(max) = parse_int("max_age", &filters.max_age)? {
        queries.push(Query::less_or_equal("age", max));
    }

    // Pagination always trails the field predicates, and every compiled
    // query carries a window bound.
    queries.push(Query::limit(page.limit));
    if page.offset > 0 {
        queries.push(Query::offset(page.offset));
    }

    Ok(queries)
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn push_equal(queries: &mut Vec<Query>, field: &str, value: &Option<String>) {
    if let Some(v) = trimmed(value) {
        queries.push(Query::equal(field, v));
    }
}

fn parse_int(field: &str, value: &Option<String>) -> Result<Option<i64>, DomainError> {
    trimmed(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| DomainError::validation(field, format!("not a number: '{v}'")))
        })
        .transpose()
}

fn parse_date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>, DomainError> {
    trimmed(value)
        .map(|v| {
            v.parse::<NaiveDate>()
                .map_err(|_| DomainError::validation(field, format!("not a date: '{v}'")))
        })
        .transpose()
}
