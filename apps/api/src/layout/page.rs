use serde::{Deserialize, Serialize};

/// Page geometry for the rendered document. All lengths are millimetres,
/// measured from the top-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_right_mm: f32,
    /// Distance from the page bottom at which content triggers a page break.
    pub break_margin_mm: f32,
    /// Inner horizontal padding of a text cell.
    pub cell_padding_mm: f32,
    /// Hard ceiling on the number of pages one document may produce.
    pub max_pages: usize,
}

/// A4 portrait, 10 mm margins, break 20 mm above the bottom edge.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_left_mm: 10.0,
        margin_top_mm: 10.0,
        margin_right_mm: 10.0,
        break_margin_mm: 20.0,
        cell_padding_mm: 1.0,
        max_pages: 50,
    }
}

impl PageConfig {
    /// Width between the left and right margins.
    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// X coordinate of the right margin.
    pub fn right_edge_mm(&self) -> f32 {
        self.width_mm - self.margin_right_mm
    }

    /// Lowest y an element's bottom may reach before a page break.
    pub fn break_threshold_mm(&self) -> f32 {
        self.height_mm - self.break_margin_mm
    }
}
