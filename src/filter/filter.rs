use serde_json::Value;

use super::filter_where::FilterWhere;
use super::types::{FilterOp, FilterWhereInfo};

/// Predicate tree describing which records a listing returns.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    Where(FilterWhereInfo),
    Or(Vec<QueryFilter>),
    And(Vec<QueryFilter>),
}

impl QueryFilter {
    pub fn condition(field: impl Into<String>, operator: FilterOp, value: impl Into<Value>) -> Self {
        QueryFilter::Where(FilterWhereInfo {
            field: field.into(),
            operator,
            value: value.into(),
        })
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, FilterOp::Equals, value)
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, FilterOp::NotEquals, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, FilterOp::Contains, value)
    }

    pub fn like(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, FilterOp::Like, value)
    }

    pub fn or(clauses: Vec<QueryFilter>) -> Self {
        QueryFilter::Or(clauses)
    }

    /// Conjunction of `clauses`; a single clause is returned unwrapped.
    pub fn and(mut clauses: Vec<QueryFilter>) -> Self {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            QueryFilter::And(clauses)
        }
    }

    /// Top-level clauses of a conjunction (or the filter itself)
    pub fn clauses(&self) -> Vec<&QueryFilter> {
        match self {
            QueryFilter::And(clauses) => clauses.iter().collect(),
            other => vec![other],
        }
    }

    /// CMS `where` document
    pub fn to_where(&self) -> Value {
        FilterWhere::generate(self)
    }

    /// Bracketed query-string pairs, e.g. `where[or][0][title][like]=komodo`
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        FilterWhere::generate_pairs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_collapses_single_clause() {
        let base = QueryFilter::not_equals("status", "CLOSED");
        assert_eq!(QueryFilter::and(vec![base.clone()]), base);
    }

    #[test]
    fn clauses_of_conjunction() {
        let filter = QueryFilter::and(vec![
            QueryFilter::equals("published", true),
            QueryFilter::contains("categories", "3"),
        ]);
        assert_eq!(filter.clauses().len(), 2);
        assert_eq!(QueryFilter::equals("a", 1).clauses().len(), 1);
    }
}
