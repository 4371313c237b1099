use serde::Deserialize;

/// Substring filter over product names; `None` matches everything.
#[derive(Debug, Deserialize, Clone)]
pub struct ListProductsQuery {
    pub name: Option<String>,
}
