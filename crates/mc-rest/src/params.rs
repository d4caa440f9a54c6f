//! Query parameter helpers for the REST service's paging conventions.

use sfmc_client::QueryValue;

/// An ordered set of query parameters.
///
/// Values may be scalars or lists; lists are comma-joined on the wire.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting page (`$page`).
    pub fn page(self, page: u32) -> Self {
        self.set("$page", page)
    }

    /// Set the page size (`$pagesize`).
    pub fn page_size(self, size: u32) -> Self {
        self.set("$pagesize", size)
    }

    /// Set the requested fields (`$fields`, comma-joined).
    pub fn fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.set("$fields", list)
    }

    /// Set the sort expression (`$orderBy`).
    pub fn order_by(self, expr: impl Into<String>) -> Self {
        self.set("$orderBy", expr.into())
    }

    /// Set the filter expression (`$filter`).
    pub fn filter(self, expr: impl Into<String>) -> Self {
        self.set("$filter", expr.into())
    }

    /// Set an arbitrary parameter, replacing any existing value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value.into()));
        self
    }

    /// Iterate the entries in insertion order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.entries.iter().find_map(|(k, v)| {
            if k == key {
                match v {
                    QueryValue::Single(s) => s.parse().ok(),
                    QueryValue::List(_) => None,
                }
            } else {
                None
            }
        })
    }

    /// The caller-supplied starting page, defaulting to 1.
    pub(crate) fn starting_page(&self) -> u32 {
        self.get_u32("$page").unwrap_or(1)
    }

    /// The caller-supplied page size, defaulting to [`crate::DEFAULT_PAGE_SIZE`].
    pub(crate) fn effective_page_size(&self) -> u32 {
        self.get_u32("$pagesize").unwrap_or(crate::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults() {
        let params = QueryParams::new();
        assert_eq!(params.starting_page(), 1);
        assert_eq!(params.effective_page_size(), crate::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_caller_supplied_paging() {
        let params = QueryParams::new().page(3).page_size(1000);
        assert_eq!(params.starting_page(), 3);
        assert_eq!(params.effective_page_size(), 1000);
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let params = QueryParams::new().page(1).page(7);
        assert_eq!(params.starting_page(), 7);
        assert_eq!(params.entries().count(), 1);
    }

    #[test]
    fn test_fields_become_a_list() {
        let params = QueryParams::new().fields(["id", "name"]);
        let (key, value) = params.entries().next().unwrap();
        assert_eq!(key, "$fields");
        assert_eq!(
            value,
            &QueryValue::List(vec!["id".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn test_filter_and_order_by() {
        let params = QueryParams::new()
            .filter("category.id=1234")
            .order_by("name asc");

        let keys: Vec<&str> = params.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["$filter", "$orderBy"]);
    }
}
