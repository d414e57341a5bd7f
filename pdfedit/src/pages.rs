//! Page indices, page orders and page listings.
//!
//! Pages are addressed by 0-based [`PageIndex`] everywhere in the library.
//! 1-based page numbers only appear when a page is shown to a person or read
//! from the command line; [`PageIndex::from_page_number`] and
//! [`PageIndex::page_number`] are the two crossing points.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PdfEditError, Result};
use crate::utils::digit_width;

/// 0-based position of a page within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(usize);

impl PageIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Convert a 1-based page number. Returns `None` for 0.
    pub fn from_page_number(number: usize) -> Option<Self> {
        number.checked_sub(1).map(Self)
    }

    /// The 0-based index.
    pub const fn get(self) -> usize {
        self.0
    }

    /// The 1-based page number shown to users.
    pub const fn page_number(self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for PageIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered list of pages making up an output document.
///
/// The same index may appear more than once; that page is then copied once
/// per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageOrder(Vec<PageIndex>);

impl PageOrder {
    pub fn new(indices: Vec<PageIndex>) -> Self {
        Self(indices)
    }

    /// Every page of an `page_count`-page document in document order.
    pub fn identity(page_count: usize) -> Self {
        (0..page_count).map(PageIndex::new).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[PageIndex] {
        &self.0
    }

    /// Check that every entry addresses a page of a `page_count`-page
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::IndexOutOfRange`] for the first entry that
    /// does not.
    pub fn validate(&self, page_count: usize) -> Result<()> {
        match self
            .0
            .iter()
            .enumerate()
            .find(|(_, index)| index.get() >= page_count)
        {
            Some((position, index)) => Err(PdfEditError::IndexOutOfRange {
                index: index.get(),
                position,
                page_count,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<PageIndex> for PageOrder {
    fn from_iter<I: IntoIterator<Item = PageIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<usize>> for PageOrder {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().map(PageIndex::new).collect()
    }
}

impl<'a> IntoIterator for &'a PageOrder {
    type Item = PageIndex;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PageIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for PageOrder {
    /// Formats as comma-separated 1-based page numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", index.page_number())?;
        }
        Ok(())
    }
}

/// One entry of a [`PageListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLabel {
    pub index: PageIndex,
    pub page_number: usize,
    pub label: String,
}

/// All pages of a document, ready to show in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListing {
    pub path: std::path::PathBuf,
    pub page_count: usize,
    pub pages: Vec<PageLabel>,
}

impl PageListing {
    /// Label every page of a `page_count`-page document.
    pub fn new(path: impl Into<std::path::PathBuf>, page_count: usize) -> Self {
        let pages = (0..page_count)
            .map(|i| {
                let index = PageIndex::new(i);
                PageLabel {
                    index,
                    page_number: index.page_number(),
                    label: page_label(index, page_count),
                }
            })
            .collect();

        Self {
            path: path.into(),
            page_count,
            pages,
        }
    }

    /// The order that reproduces the document unchanged.
    pub fn identity_order(&self) -> PageOrder {
        PageOrder::identity(self.page_count)
    }
}

/// Display label for a page, e.g. `Page 03 / 12`.
///
/// The page number is zero-padded to the width of `page_count`.
pub fn page_label(index: PageIndex, page_count: usize) -> String {
    let width = digit_width(page_count);
    format!(
        "Page {:0width$} / {}",
        index.page_number(),
        page_count,
        width = width
    )
}
