use std::borrow::Cow;

/// Catalog error type.
#[atlas_derive::atlas_error]
pub enum CatalogError {
    /// The index is not an integer or lies outside `0..size`.
    #[error("Invalid ID '{index}'{}. Must be an integer between 0 and {size} (exclusive)", format_context(.context))]
    InvalidIndex { index: String, size: usize, context: Option<Cow<'static, str>> },

    /// No catalog field matches the requested name, ignoring case.
    #[error("Invalid field name{}: {field}", format_context(.context))]
    UnknownField { field: String, context: Option<Cow<'static, str>> },

    /// The search pattern is not a valid regular expression.
    #[error("Invalid search pattern{}: {source}", format_context(.context))]
    InvalidPattern { source: regex::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog file error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog CSV error{}: {source}", format_context(.context))]
    Csv { source: csv::Error, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn invalid_index(index: impl ToString, size: usize) -> Self {
        Self::InvalidIndex { index: index.to_string(), size, context: None }
    }

    /// `true` for failures caused by the request rather than by the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIndex { .. } | Self::UnknownField { .. } | Self::InvalidPattern { .. }
        )
    }
}
