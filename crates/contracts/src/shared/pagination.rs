use serde::{Deserialize, Serialize};

/// Standard backend envelope: `{ "code": 200, "message": "...", "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// One server page of a listing.
///
/// Pages are 1-based on the wire. Projects report the page size as `size`,
/// base materials as `page_size`; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: usize,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default, alias = "size")]
    pub page_size: usize,
    #[serde(default)]
    pub pages: Option<usize>,
}

fn first_page() -> usize {
    1
}

impl<T> PageData<T> {
    /// Total number of pages, preferring the server's own count.
    pub fn total_pages(&self) -> usize {
        if let Some(pages) = self.pages {
            return pages;
        }
        page_count(self.total, self.page_size)
    }
}

/// Number of pages needed to hold `total` rows.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
