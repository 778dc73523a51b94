// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF label sheet writer — one full-bleed label raster per page, using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};
use labelwerk_core::PageSize;
use labelwerk_core::error::{LabelError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

/// An append-only sequence of label pages.
///
/// Pages are added with [`LabelDocument::push_canvas`] and the whole document
/// is serialised exactly once by [`LabelDocument::finalize`], which consumes
/// it. Dropping an unfinished document releases everything it holds.
pub struct LabelDocument {
    /// Page size every pushed canvas must match.
    page: PageSize,
    doc: PdfDocument,
    pages: Vec<PdfPage>,
}

impl LabelDocument {
    /// Start an empty document whose pages are `page` sized.
    pub fn new(page: PageSize, title: &str) -> Self {
        Self {
            page,
            doc: PdfDocument::new(title),
            pages: Vec::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one page holding `canvas` at its native size.
    ///
    /// The canvas is stored losslessly as an RGB image XObject and placed at
    /// the page origin at the page DPI, so it covers the page edge to edge
    /// without scaling. A canvas whose size differs from the page is
    /// rejected rather than resized.
    #[instrument(skip(self, canvas), fields(page = self.pages.len() + 1))]
    pub fn push_canvas(&mut self, canvas: &RgbaImage) -> Result<()> {
        let (width, height) = canvas.dimensions();
        if !self.page.fits_exactly(width, height) {
            return Err(LabelError::Assembly(format!(
                "canvas is {}x{} but pages are {}x{}",
                width, height, self.page.width_px, self.page.height_px
            )));
        }

        // Labels are opaque; the alpha channel carries nothing worth embedding.
        let rgb: RgbImage = canvas.convert();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(self.page.dpi),
                rotate: None,
            },
        }];

        let (w_mm, h_mm) = self.page.dimensions_mm();
        self.pages.push(PdfPage::new(Mm(w_mm), Mm(h_mm), ops));
        debug!(w_mm, h_mm, "Label page added");
        Ok(())
    }

    /// Serialise the document.
    ///
    /// A document without pages has nothing to deliver and is an error, as is
    /// an empty serialisation.
    #[instrument(skip(self), fields(pages = self.pages.len()))]
    pub fn finalize(self) -> Result<Vec<u8>> {
        let Self { mut doc, pages, .. } = self;
        if pages.is_empty() {
            return Err(LabelError::Assembly("document has no pages".into()));
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialisation produced warnings");
        }
        if output.is_empty() {
            return Err(LabelError::Assembly("PDF serialisation produced no bytes".into()));
        }

        info!(
            pages = page_count,
            bytes = output.len(),
            sha256 = %sha256_hex(&output),
            "Label document finalized"
        );
        Ok(output)
    }

    /// Finalize and write the PDF to `path`.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finalize()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote label PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Build a document from `canvases` in order, one page each.
///
/// A canvas that cannot be placed is logged with its position and skipped;
/// the remaining pages keep their relative order.
pub fn assemble(
    canvases: impl IntoIterator<Item = RgbaImage>,
    page: PageSize,
    title: &str,
) -> LabelDocument {
    let mut document = LabelDocument::new(page, title);
    for (index, canvas) in canvases.into_iter().enumerate() {
        if let Err(err) = document.push_canvas(&canvas) {
            warn!(index, error = %err, "Skipping label page");
        }
    }
    document
}

/// Lowercase hex SHA-256 of a finished document.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
