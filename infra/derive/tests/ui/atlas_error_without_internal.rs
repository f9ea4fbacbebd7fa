use atlas_derive::atlas_error;
use std::borrow::Cow;

#[atlas_error]
pub enum LookupError {
    #[error("Duplicate name{}: {name}", format_context(.context))]
    Duplicate { name: String, context: Option<Cow<'static, str>> },

    #[error("Invalid format")]
    InvalidFormat {},
}

fn main() {
    let err = LookupError::Duplicate { name: "Trip".to_owned(), context: None };
    assert_eq!(err.to_string(), "Duplicate name: Trip");
    assert_eq!(LookupError::InvalidFormat {}.to_string(), "Invalid format");
}
