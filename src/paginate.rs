// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number * self.page_size < self.total_items
    }
}

/// Slices one page out of `items`. `page_number` is clamped into
/// `1..=total_pages`, so asking past the end yields the last page. An empty
/// list is a single empty page. A zero page size is treated as 1.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let number = page_number.clamp(1, total_pages);
    let start = (number - 1) * page_size;
    let end = (start + page_size).min(total_items);
    Page {
        items: &items[start..end],
        number,
        page_size,
        total_pages,
        total_items,
    }
}
