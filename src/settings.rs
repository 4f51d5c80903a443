use serde::{Deserialize, Serialize};

use crate::models::RectF;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub text_selectable: bool,
    pub continuous_scroll: bool,
    pub selecting_search_result: bool,
    /// Height of the fixed header above the content, added to handle anchors.
    pub header_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub padding_left: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
}

impl Settings {
    /// Content area of the view once padding is taken off.
    pub fn visible_rect(&self) -> RectF {
        RectF::new(
            self.padding_left,
            self.padding_top,
            self.viewport_width - self.padding_right,
            self.viewport_height - self.padding_bottom,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_selectable: true,
            continuous_scroll: false,
            selecting_search_result: false,
            header_height: 0.0,
            viewport_width: 1080.0,
            viewport_height: 1920.0,
            padding_left: 16.0,
            padding_top: 0.0,
            padding_right: 16.0,
            padding_bottom: 0.0,
        }
    }
}
