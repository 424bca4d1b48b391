//! Endpoint path and query string helpers.

use url::form_urlencoded;

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// Form-encoded query string builder.
///
/// Produces `key=value` pairs joined with `&`, encoding values the way the
/// Atlassian APIs expect (`"` becomes `%22`, `=` becomes `%3D`).
/// Pairs stay unencoded until [`Query::finish`]; the builder must be `Send`
/// to live across `.await` points.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append when `value` is present.
    pub(crate) fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append when `value` is non-empty.
    pub(crate) fn push_str(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.push(key, value);
        }
        self
    }

    /// Append one pair per value, repeating the key.
    pub(crate) fn push_each<V: ToString>(&mut self, key: &str, values: &[V]) -> &mut Self {
        for value in values {
            self.push(key, value.to_string());
        }
        self
    }

    /// Join comma-separated values under one key, when any are given.
    pub(crate) fn push_joined(&mut self, key: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            self.push(key, values.join(","));
        }
        self
    }

    /// Append the query to `path`, adding `?` only if pairs were pushed.
    pub(crate) fn finish(self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encodes_quotes() {
        let mut query = Query::new();
        query.push("q", r#"permission="owner""#);
        assert_eq!(
            query.finish("2.0/workspaces/acme/permissions"),
            "2.0/workspaces/acme/permissions?q=permission%3D%22owner%22"
        );
    }

    #[test]
    fn test_empty_query_adds_nothing() {
        let mut query = Query::new();
        query.push_opt::<u32>("startAt", None).push_str("expand", "");
        assert_eq!(query.finish("rest/api/3/field"), "rest/api/3/field");
    }

    #[test]
    fn test_repeated_keys() {
        let mut query = Query::new();
        query.push_each("id", &["10000", "10001"]);
        assert_eq!(query.finish("p"), "p?id=10000&id=10001");
    }

    #[test]
    fn test_query_is_send() {
        fn assert_send<T: Send>(_: &T) {}

        let mut query = Query::new();
        query.push("startAt", 0).push_joined("expand", &["lead".to_string()]);
        assert_send(&query);

        let pending = async move {
            tokio::task::yield_now().await;
            query.finish("rest/api/3/project/search")
        };
        assert_send(&pending);
        assert_eq!(
            tokio_test::block_on(pending),
            "rest/api/3/project/search?startAt=0&expand=lead"
        );
    }

    #[test]
    fn test_segment_encodes_reserved() {
        assert_eq!(segment("work-space-name-sample"), "work-space-name-sample");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
