use crate::ExportError;

const MM_PER_INCH: f32 = 25.4;
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    pub format: ImageFormat,
    /// Encoder quality in (0, 1].
    pub quality: f32,
}

/// Capture settings for the content region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub scale: f32,
    pub use_cors: bool,
    pub logging: bool,
    pub letter_rendering: bool,
    pub allow_taint: bool,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Mm,
    Pt,
}

impl Unit {
    pub fn to_points(self, value: f32) -> f32 {
        match self {
            Unit::Mm => value * POINTS_PER_INCH / MM_PER_INCH,
            Unit::Pt => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    /// Portrait width and height in points.
    pub fn size_points(self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (Unit::Mm.to_points(210.0), Unit::Mm.to_points(297.0)),
            PageFormat::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub unit: Unit,
    pub format: PageFormat,
    pub orientation: Orientation,
    pub compress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBreakMode {
    /// Never split a block across pages when it fits on one.
    AvoidAll,
    /// Honour explicit page-break blocks.
    Css,
    /// Same as `Css`, kept for configurations that list both.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Top, right, bottom, left, in `page.unit`.
    pub margin: [f32; 4],
    pub image: ImageOptions,
    pub capture: CaptureOptions,
    pub page: PageOptions,
    pub page_break: Vec<PageBreakMode>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            margin: [10.0, 10.0, 10.0, 10.0],
            image: ImageOptions {
                format: ImageFormat::Jpeg,
                quality: 0.98,
            },
            capture: CaptureOptions {
                scale: 2.0,
                use_cors: true,
                logging: false,
                letter_rendering: true,
                allow_taint: false,
                scroll_x: 0.0,
                scroll_y: 0.0,
            },
            page: PageOptions {
                unit: Unit::Mm,
                format: PageFormat::A4,
                orientation: Orientation::Portrait,
                compress: true,
            },
            page_break: vec![
                PageBreakMode::AvoidAll,
                PageBreakMode::Css,
                PageBreakMode::Legacy,
            ],
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ExportError> {
        if !(self.capture.scale.is_finite() && self.capture.scale > 0.0) {
            return Err(ExportError::InvalidOptions(format!(
                "capture scale must be positive, got {}",
                self.capture.scale
            )));
        }
        if !(self.image.quality > 0.0 && self.image.quality <= 1.0) {
            return Err(ExportError::InvalidOptions(format!(
                "image quality must be in (0, 1], got {}",
                self.image.quality
            )));
        }
        if self.margin.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(ExportError::InvalidOptions(
                "margins must be non-negative".to_string(),
            ));
        }
        let (width, height) = self.content_size();
        if width <= 0.0 || height <= 0.0 {
            return Err(ExportError::InvalidOptions(
                "margins leave no printable area".to_string(),
            ));
        }
        Ok(())
    }

    /// Page width and height in points after orientation.
    pub fn page_size(&self) -> (f32, f32) {
        let (w, h) = self.page.format.size_points();
        match self.page.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Margins in points: top, right, bottom, left.
    pub fn margin_points(&self) -> [f32; 4] {
        self.margin.map(|m| self.page.unit.to_points(m))
    }

    /// Printable width and height in points.
    pub fn content_size(&self) -> (f32, f32) {
        let (w, h) = self.page_size();
        let [top, right, bottom, left] = self.margin_points();
        (w - left - right, h - top - bottom)
    }

    pub fn avoids_splitting_blocks(&self) -> bool {
        self.page_break.contains(&PageBreakMode::AvoidAll)
    }

    pub fn honours_explicit_breaks(&self) -> bool {
        self.page_break
            .iter()
            .any(|mode| matches!(mode, PageBreakMode::Css | PageBreakMode::Legacy))
    }
}
