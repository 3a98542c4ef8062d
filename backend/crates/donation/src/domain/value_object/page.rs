//! Optional list pagination

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Build from raw query values. `None` when neither is given, meaning
    /// "return everything". Out-of-range values are clamped.
    pub fn from_query(page: Option<u32>, limit: Option<u32>, max_limit: u32) -> Option<Self> {
        if page.is_none() && limit.is_none() {
            return None;
        }

        Some(Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT.min(max_limit)).clamp(1, max_limit.max(1)),
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}
