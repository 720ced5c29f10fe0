pub mod book_record;
pub mod query;
pub mod result_set;
pub mod search_field;
