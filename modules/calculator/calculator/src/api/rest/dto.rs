/// Name of the query parameter carrying the expression.
pub const EXPRESSION_PARAM: &str = "expression";

/// Query of `GET /calculate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculateQuery {
    pub expression: Option<String>,
}

impl CalculateQuery {
    /// Decode a raw query string.
    ///
    /// When `expression` occurs more than once the first occurrence wins.
    /// `+` decodes to a space. A query that cannot be decoded is treated as
    /// carrying no expression.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let expression = raw
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .and_then(|pairs| {
                pairs
                    .into_iter()
                    .find(|(name, _)| name == EXPRESSION_PARAM)
                    .map(|(_, value)| value)
            });
        Self { expression }
    }
}
