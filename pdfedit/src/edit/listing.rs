//! Page listing.

use std::path::Path;

use super::Editor;
use crate::error::Result;
use crate::io::{Codec, DocumentView, FileOps};
use crate::pages::PageListing;
use crate::validation;

impl<C: Codec, F: FileOps> Editor<C, F> {
    /// List every page of `source`, first to last.
    ///
    /// # Errors
    ///
    /// [`crate::PdfEditError::NoFileSelected`] if `source` is `None`, or the
    /// errors of opening the document.
    pub fn list_pages(&self, source: Option<&Path>) -> Result<PageListing> {
        let path = validation::require_source(source)?;
        let view = self.open(path)?;
        let page_count = view.page_count();

        log::debug!("{} has {} page(s)", path.display(), page_count);

        Ok(PageListing::new(path, page_count))
    }
}
