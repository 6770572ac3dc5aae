use serde_json::{json, Map, Value};

use super::filter::QueryFilter;

/// Renders a `QueryFilter` into the shapes the CMS query API accepts
pub struct FilterWhere {
    pairs: Vec<(String, String)>,
}

impl FilterWhere {
    pub fn generate(filter: &QueryFilter) -> Value {
        match filter {
            QueryFilter::Where(info) => {
                let mut condition = Map::new();
                condition.insert(info.operator.as_str().to_string(), info.value.clone());
                let mut field = Map::new();
                field.insert(info.field.clone(), Value::Object(condition));
                Value::Object(field)
            }
            QueryFilter::Or(clauses) => json!({ "or": clauses.iter().map(Self::generate).collect::<Vec<_>>() }),
            QueryFilter::And(clauses) => json!({ "and": clauses.iter().map(Self::generate).collect::<Vec<_>>() }),
        }
    }

    pub fn generate_pairs(filter: &QueryFilter) -> Vec<(String, String)> {
        let mut filter_where = Self { pairs: vec![] };
        filter_where.push_filter("where", filter);
        filter_where.pairs
    }

    fn push_filter(&mut self, prefix: &str, filter: &QueryFilter) {
        match filter {
            QueryFilter::Where(info) => {
                let key = format!("{}[{}][{}]", prefix, info.field, info.operator.as_str());
                self.push_value(key, &info.value);
            }
            QueryFilter::Or(clauses) => self.push_group(prefix, "or", clauses),
            QueryFilter::And(clauses) => self.push_group(prefix, "and", clauses),
        }
    }

    fn push_group(&mut self, prefix: &str, joiner: &str, clauses: &[QueryFilter]) {
        for (i, clause) in clauses.iter().enumerate() {
            self.push_filter(&format!("{}[{}][{}]", prefix, joiner, i), clause);
        }
    }

    fn push_value(&mut self, key: String, value: &Value) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.push_value(format!("{}[{}]", key, i), item);
                }
            }
            Value::String(s) => self.pairs.push((key, s.clone())),
            other => self.pairs.push((key, other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_filter() -> QueryFilter {
        QueryFilter::and(vec![
            QueryFilter::not_equals("status", "CLOSED"),
            QueryFilter::or(vec![
                QueryFilter::like("title", "komodo"),
                QueryFilter::like("content", "komodo"),
            ]),
        ])
    }

    #[test]
    fn where_document_shape() {
        assert_eq!(
            search_filter().to_where(),
            json!({
                "and": [
                    { "status": { "not_equals": "CLOSED" } },
                    { "or": [
                        { "title": { "like": "komodo" } },
                        { "content": { "like": "komodo" } }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn query_pairs_use_bracket_paths() {
        let pairs = search_filter().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("where[and][0][status][not_equals]".to_string(), "CLOSED".to_string()),
                ("where[and][1][or][0][title][like]".to_string(), "komodo".to_string()),
                ("where[and][1][or][1][content][like]".to_string(), "komodo".to_string()),
            ]
        );
    }

    #[test]
    fn scalar_and_array_values() {
        let pairs = QueryFilter::equals("published", true).to_query_pairs();
        assert_eq!(pairs, vec![("where[published][equals]".to_string(), "true".to_string())]);

        let pairs = QueryFilter::contains("tags", json!(["a", 2])).to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("where[tags][contains][0]".to_string(), "a".to_string()),
                ("where[tags][contains][1]".to_string(), "2".to_string()),
            ]
        );
    }
}
