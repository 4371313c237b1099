pub mod query_helpers;
