//! Response envelopes
//!
//! Every entity response is wrapped as `{ success, data }`; paginated lists
//! add `total`, `page`, `limit` and usually `last_page`.

use serde::{Deserialize, Serialize};

/// Default page size for paginated listings
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,

    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap a single-entity payload; servers may acknowledge a write with
    /// `{ success }` alone, which yields `None`
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub success: bool,

    pub data: Option<Vec<T>>,

    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub last_page: Option<u32>,
}

impl<T> ListEnvelope<T> {
    /// Unwrap list items; absent data is an empty list
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }

    /// Unwrap into a page, filling metadata the server left out
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        let data = self.data.unwrap_or_default();
        let total = self.total.unwrap_or(data.len() as u64);
        let limit = self.limit.unwrap_or(request.limit);
        let last_page = self
            .last_page
            .unwrap_or_else(|| last_page_for(total, limit));

        Page {
            data,
            total,
            page: self.page.unwrap_or(request.page),
            last_page,
        }
    }
}

/// Number of pages needed for `total` items, never less than one
pub fn last_page_for(total: u64, limit: u32) -> u32 {
    if limit == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page selector for paginated listings (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            last_page: self.last_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_list_data_is_empty() {
        let envelope: ListEnvelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.into_items().is_empty());

        let envelope: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert!(envelope.into_items().is_empty());
    }

    #[test]
    fn test_absent_entity_data_is_none() {
        let envelope: Envelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.into_data(), None);

        let envelope: Envelope<u32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(envelope.into_data(), Some(7));
    }

    #[test]
    fn test_page_metadata_fallbacks() {
        let envelope: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"total":21,"page":2,"limit":10}"#)
                .unwrap();
        let page = envelope.into_page(PageRequest::new(2, 10));

        assert_eq!(page.last_page, 3);
        assert_eq!(page.page, 2);
        assert!(page.has_next());
    }

    #[test]
    fn test_server_last_page_wins() {
        let envelope: ListEnvelope<u32> =
            serde_json::from_str(r#"{"data":[],"total":0,"last_page":4}"#).unwrap();
        assert_eq!(envelope.into_page(PageRequest::default()).last_page, 4);
    }

    #[test]
    fn test_last_page_for() {
        assert_eq!(last_page_for(0, 10), 1);
        assert_eq!(last_page_for(10, 10), 1);
        assert_eq!(last_page_for(11, 10), 2);
        assert_eq!(last_page_for(5, 0), 1);
    }
}
