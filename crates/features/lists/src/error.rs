use std::borrow::Cow;

/// List registry error type.
#[atlas_derive::atlas_error]
pub enum ListsError {
    /// No list matches the name, ignoring case.
    #[error("List '{name}' not found{}", format_context(.context))]
    NotFound { name: String, context: Option<Cow<'static, str>> },

    /// A list with the same case-folded name already exists.
    #[error("List name '{name}' already exists{}. Choose a different name.", format_context(.context))]
    DuplicateName { name: String, context: Option<Cow<'static, str>> },

    /// The member payload is not a sequence.
    #[error("Invalid data format{}. Provide an array of destination IDs.", format_context(.context))]
    InvalidFormat { context: Option<Cow<'static, str>> },

    #[error("Internal lists error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ListsError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound { name: name.to_owned(), context: None }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// `true` for failures caused by the request rather than by the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::DuplicateName { .. } | Self::InvalidFormat { .. })
    }
}
