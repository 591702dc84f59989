//! Review list state: row selection, pagination and history filters

use crate::api::models::{QuestionId, QuestionStatus, QuestionType};

pub const DEFAULT_PAGE_LIMIT: u32 = 5;

/// Ordered set of selected question ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<QuestionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id; returns whether it is selected afterwards
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<QuestionId>,
    {
        for id in ids {
            let id = id.into();
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[QuestionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Hand the ids to a bulk action and leave the selection empty
    pub fn take(&mut self) -> Vec<QuestionId> {
        std::mem::take(&mut self.ids)
    }
}

/// Page cursor; `total_pages` is whatever the server last reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            total_pages: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Record the server's page count, pulling the cursor back if it ran past the end
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.page = self.page.min(self.last_page());
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.last_page());
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Advance one page; returns false at the last page
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Filters of the history list. Unset or blank values are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilters {
    pub title: Option<String>,
    pub difficulty: Option<u8>,
    pub status: Option<QuestionStatus>,
    pub locale_included: Option<String>,
    pub locale_excluded: Option<String>,
    pub category: Option<String>,
    pub question_type: Option<QuestionType>,
}

impl QuestionFilters {
    pub fn is_empty(&self) -> bool {
        self.to_query_params().is_empty()
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                let value = value.trim().to_string();
                if !value.is_empty() {
                    params.push((key.to_string(), value));
                }
            }
        };

        push("title", self.title.clone());
        push("difficulty", self.difficulty.map(|d| d.to_string()));
        push("status", self.status.as_ref().map(ToString::to_string));
        push("localeIncluded", self.locale_included.clone());
        push("localeExcluded", self.locale_excluded.clone());
        push("category", self.category.clone());
        push("type", self.question_type.map(|t| t.to_string()));
        params
    }
}
