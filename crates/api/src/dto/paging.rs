use catalog_domain::paging::DEFAULT_PAGE_SIZE;
use catalog_domain::{DomainError, PageRequest, SortDirection, SortField};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(alias = "sortDir")]
    pub direction: Option<String>,
}

impl PageQuery {
    pub fn to_page_request(&self) -> Result<PageRequest, DomainError> {
        page_request(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.direction.as_deref(),
        )
    }
}

pub(crate) fn page_request(
    page: Option<u32>,
    size: Option<u32>,
    sort_by: Option<&str>,
    direction: Option<&str>,
) -> Result<PageRequest, DomainError> {
    let sort_by = match sort_by {
        Some(s) => SortField::parse(s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown sort field '{}'", s)))?,
        None => SortField::default(),
    };
    let direction = match direction {
        Some(d) => SortDirection::parse(d).ok_or_else(|| {
            DomainError::Validation(format!("Sort direction must be ASC or DESC, got '{}'", d))
        })?,
        None => SortDirection::default(),
    };

    Ok(PageRequest::new(
        page.unwrap_or(0),
        size.unwrap_or(DEFAULT_PAGE_SIZE),
        sort_by,
        direction,
    ))
}
