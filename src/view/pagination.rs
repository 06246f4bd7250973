use serde::Serialize;

use crate::api::ListParams;

/// 0-based page cursor translated to `skip`/`limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u64,
    pub page_size: u64,
}

/// What a footer shows: "26-47 of 47, page 2/2". `page` stays 0-based;
/// only the rendered text counts from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u64,
    pub total_pages: u64,
    pub first_item: u64,
    pub last_item: u64,
    pub total: u64,
}

impl Pager {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    /// From a 1-based page number as typed on the command line
    pub fn from_page_number(number: u64, page_size: u64) -> Self {
        Self::new(number.saturating_sub(1), page_size)
    }

    fn skip(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }

    pub fn params(&self) -> ListParams {
        ListParams::new(self.skip(), self.page_size)
    }

    pub fn window(&self, total: u64) -> PageWindow {
        let skip = self.skip();
        let (first_item, last_item) = if total == 0 || skip >= total {
            (0, 0)
        } else {
            (skip + 1, skip.saturating_add(self.page_size).min(total))
        };

        PageWindow {
            page: self.page,
            total_pages: total_pages(total, self.page_size),
            first_item,
            last_item,
            total,
        }
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.page_size)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.page.saturating_sub(1), self.page_size)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(0, ListParams::DEFAULT_LIMIT)
    }
}

pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1))
}

impl PageWindow {
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} of {} (page {}/{})",
            self.first_item,
            self.last_item,
            self.total,
            self.page.saturating_add(1),
            self.total_pages.max(1)
        )
    }
}
