use super::filter::QueryFilter;
use super::types::ListParams;
use crate::types::Collection;

/// Fixed shape of a listing endpoint: the predicate every query starts from
/// and the fields user parameters are matched against.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub collection: Collection,
    pub base: QueryFilter,
    pub search_fields: &'static [&'static str],
    pub category_field: &'static str,
    pub status_field: Option<&'static str>,
}

impl ListingConfig {
    /// Listing for `collection`, if it has one
    pub fn for_collection(collection: Collection) -> Option<Self> {
        match collection {
            Collection::Reports => Some(Self {
                collection,
                base: QueryFilter::not_equals("status", "CLOSED"),
                search_fields: &["title", "content"],
                category_field: "category",
                status_field: Some("status"),
            }),
            Collection::Destinations => Some(Self {
                collection,
                base: QueryFilter::equals("published", true),
                search_fields: &["title", "content"],
                category_field: "categories",
                status_field: None,
            }),
            _ => None,
        }
    }

    /// Base predicate plus one clause per supplied parameter, combined with AND.
    ///
    /// Values are used verbatim; coercion belongs to the caller.
    pub fn build_filter(&self, params: &ListParams) -> QueryFilter {
        let mut clauses = vec![self.base.clone()];

        if let Some(query) = non_empty(params.query.as_deref()) {
            if !self.search_fields.is_empty() {
                clauses.push(QueryFilter::or(
                    self.search_fields
                        .iter()
                        .map(|field| QueryFilter::like(*field, query))
                        .collect(),
                ));
            }
        }

        if let Some(category) = non_empty(params.category.as_deref()) {
            clauses.push(QueryFilter::contains(self.category_field, category));
        }

        if let (Some(status), Some(field)) = (params.status, self.status_field) {
            let exclude = QueryFilter::not_equals(field, status.as_str());
            if exclude != self.base {
                clauses.push(exclude);
            }
        }

        QueryFilter::and(clauses)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::Status;

    fn reports() -> ListingConfig {
        ListingConfig::for_collection(Collection::Reports).unwrap()
    }

    #[test]
    fn only_some_collections_have_listings() {
        assert!(ListingConfig::for_collection(Collection::Destinations).is_some());
        assert!(ListingConfig::for_collection(Collection::Users).is_none());
    }

    #[test]
    fn whitespace_params_add_nothing() {
        let params = ListParams {
            query: Some("   ".to_string()),
            category: Some(String::new()),
            status: None,
        };
        assert_eq!(reports().build_filter(&params), reports().base);
    }

    #[test]
    fn query_is_trimmed() {
        let params = ListParams {
            query: Some(" komodo ".to_string()),
            ..Default::default()
        };
        let filter = reports().build_filter(&params);
        assert_eq!(
            filter.clauses()[1],
            &QueryFilter::or(vec![
                QueryFilter::like("title", "komodo"),
                QueryFilter::like("content", "komodo"),
            ])
        );
    }

    #[test]
    fn status_exclusion() {
        let params = ListParams {
            status: Some(Status::InProgress),
            ..Default::default()
        };
        let filter = reports().build_filter(&params);
        assert_eq!(filter.clauses()[1], &QueryFilter::not_equals("status", "IN_PROGRESS"));

        let params = ListParams {
            status: Some(Status::Closed),
            ..Default::default()
        };
        assert_eq!(reports().build_filter(&params), reports().base);
    }

    #[test]
    fn status_ignored_without_status_field() {
        let destinations = ListingConfig::for_collection(Collection::Destinations).unwrap();
        let params = ListParams {
            status: Some(Status::Open),
            ..Default::default()
        };
        assert_eq!(destinations.build_filter(&params), destinations.base);
    }
}
