use atlas_derive::atlas_error;
use std::borrow::Cow;

#[atlas_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64, DemoError> {
    raw.parse::<i64>().context("parsing index")
}

fn main() {
    assert!(parse("12").is_ok());
    assert!(parse("twelve").is_err());
}
