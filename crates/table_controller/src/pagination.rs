//! Page/offset translation for the toolbar and footer paginators.

use serde::Serialize;
use shared::{domain::Metadata, protocol::ParamsChange};

use crate::error::{Result, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePerPage {
    pub page: u32,
    pub per_page: u32,
}

pub fn page_from_offset(limit: u32, offset: u32) -> Result<PagePerPage> {
    if limit == 0 {
        return Err(TableError::validation("limit", "must be at least 1"));
    }
    Ok(PagePerPage {
        page: offset / limit + 1,
        per_page: limit,
    })
}

/// `page` is 1-indexed.
pub fn offset_from_page(page: u32, limit: u32) -> Result<u32> {
    if page == 0 {
        return Err(TableError::validation("page", "pages start at 1"));
    }
    (page - 1).checked_mul(limit).ok_or_else(|| {
        TableError::validation(
            "page",
            format!("page {page} with limit {limit} overflows the offset"),
        )
    })
}

pub fn set_page(page: u32, limit: u32) -> Result<ParamsChange> {
    Ok(ParamsChange {
        offset: Some(offset_from_page(page, limit)?),
        ..ParamsChange::default()
    })
}

/// Changing the page size always returns to the first page.
pub fn per_page_select(per_page: u32) -> Result<ParamsChange> {
    if per_page == 0 {
        return Err(TableError::validation("per_page", "must be at least 1"));
    }
    Ok(ParamsChange {
        limit: Some(per_page),
        offset: Some(0),
        ..ParamsChange::default()
    })
}

/// Emits only the fields that differ from `metadata`; an unchanged page
/// yields an empty change.
pub fn refresh(page: u32, per_page: u32, metadata: &Metadata) -> Result<ParamsChange> {
    if per_page == 0 {
        return Err(TableError::validation("per_page", "must be at least 1"));
    }
    let offset = offset_from_page(page, per_page)?;
    let limit = per_page;

    Ok(ParamsChange {
        offset: (metadata.offset != offset).then_some(offset),
        limit: (metadata.limit != limit).then_some(limit),
        ..ParamsChange::default()
    })
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
