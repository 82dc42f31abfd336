mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{Client, Fetch, FetchResponse, DEFAULT_BASE_URL, SEARCH_PATH};
pub use self::errors::Error;
pub use self::query::{QueryParams, SearchQuery, TextField, PAGE_PARAM};
