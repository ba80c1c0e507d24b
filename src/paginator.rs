use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum PageError {
    #[error("Page has to be greater than 0")]
    Zero,
    #[error("Page has to be less than page_count ({0})")]
    OutOfRange(u32),
}

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = if items.is_empty() {
            0
        } else {
            let upper_bound = (items.len() - 1) as u32;
            (upper_bound / page_size) + 1
        };

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Clamps a requested page into range, the first page being the default.
    pub fn sanitize(&self, page: u32) -> u32 {
        match page {
            0 => 1,
            x if x > self.page_count => 1,
            x => x,
        }
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], PageError> {
        match page {
            0 => return Err(PageError::Zero),
            x if x > self.page_count => return Err(PageError::OutOfRange(self.page_count)),
            _ => {}
        };

        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        Ok(&self.items[start..end])
    }
}
