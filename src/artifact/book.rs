use serde::{Deserialize, Serialize};

/// Set of book pages carried by an item.
///
/// Each page of an artifact book is one bit. A book is complete when every
/// page bit is set; an item with no page metadata carries `NO_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMask(u8);

impl PageMask {
    pub const NO_PAGE: PageMask = PageMask(0);
    pub const PAGE_1: PageMask = PageMask(0b001);
    pub const PAGE_2: PageMask = PageMask(0b010);
    pub const PAGE_3: PageMask = PageMask(0b100);
    pub const ALL_PAGES: PageMask = PageMask(0b111);

    pub const PAGES_PER_BOOK: u8 = 3;

    /// Build a mask from 1-based page numbers
    pub fn from_pages(pages: &[u8]) -> Option<Self> {
        let mut bits = 0u8;
        for &page in pages {
            if page == 0 || page > Self::PAGES_PER_BOOK {
                return None;
            }
            bits |= 1 << (page - 1);
        }
        Some(PageMask(bits))
    }

    pub fn page_count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::ALL_PAGES
    }
}
