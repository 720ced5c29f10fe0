use anyhow::Result;
use inquire::validator::{StringValidator, Validation};

use bookfinder::types::query::Query;

#[derive(Clone)]
struct ValidatorNonEmpty {}
impl StringValidator for ValidatorNonEmpty {
    fn validate(&self, input: &str) -> Result<Validation, inquire::CustomUserError> {
        if !Query::new(input).is_submittable() {
            return Ok(Validation::Invalid("Empty search not allowed".into()));
        }
        Ok(Validation::Valid)
    }
}

pub fn prompt_query() -> Result<Query> {
    let text = inquire::Text::new("What are you looking for?")
        .with_placeholder("Enter book title, author, or genre...")
        .with_validator(ValidatorNonEmpty {})
        .prompt()?;
    Ok(Query::new(text))
}
