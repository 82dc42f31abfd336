mod search;
pub use self::search::{QueryParams, SearchQuery, TextField, PAGE_PARAM};
