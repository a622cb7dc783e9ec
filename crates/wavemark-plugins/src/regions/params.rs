//! Construction and update parameters for regions

use wavemark_core::ElementId;

/// Which bound a resize moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Start => "start",
            Side::End => "end",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label shown inside a region
#[derive(Debug, Clone, PartialEq)]
pub enum RegionContent {
    /// Plain text, wrapped in a padded inline-block element
    Text(String),
    /// A caller-built element, attached as-is
    Element(ElementId),
}

impl From<&str> for RegionContent {
    fn from(text: &str) -> Self {
        RegionContent::Text(text.to_string())
    }
}

impl From<String> for RegionContent {
    fn from(text: String) -> Self {
        RegionContent::Text(text)
    }
}

/// Parameters for creating a region
///
/// Only `start` is required. `end` defaults to `start`, which makes a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionParams {
    /// Caller-visible identifier; generated when absent
    pub id: Option<String>,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: Option<f64>,
    /// Whether the body can be dragged to move the region (default true)
    pub drag: Option<bool>,
    /// Whether the edges can be dragged to resize (default true)
    pub resize: Option<bool>,
    /// Fill colour (marker line colour for markers)
    pub color: Option<String>,
    /// Lower bound on `end - start` enforced by drag/resize (default 0)
    pub min_length: Option<f64>,
    /// Upper bound on `end - start` enforced by drag/resize (default unbounded)
    pub max_length: Option<f64>,
    /// Restrict the region to one channel lane
    pub channel_idx: Option<usize>,
    /// Whether the label can be edited in place (default false)
    pub content_editable: Option<bool>,
    pub content: Option<RegionContent>,
}

impl RegionParams {
    /// A region spanning `start..end`
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            end: Some(end),
            ..Self::marker(start)
        }
    }

    /// A zero-width marker at `time`
    pub fn marker(time: f64) -> Self {
        Self {
            id: None,
            start: time,
            end: None,
            drag: None,
            resize: None,
            color: None,
            min_length: None,
            max_length: None,
            channel_idx: None,
            content_editable: None,
            content: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<RegionContent>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_drag(mut self, drag: bool) -> Self {
        self.drag = Some(drag);
        self
    }

    pub fn with_resize(mut self, resize: bool) -> Self {
        self.resize = Some(resize);
        self
    }

    pub fn with_length_limits(mut self, min: f64, max: f64) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_channel(mut self, channel_idx: usize) -> Self {
        self.channel_idx = Some(channel_idx);
        self
    }

    pub fn with_content_editable(mut self, editable: bool) -> Self {
        self.content_editable = Some(editable);
        self
    }
}

/// Partial update for an existing region
///
/// Each field is applied independently; `None` leaves it untouched.
/// `start` and `end` are re-clamped and re-rendered together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionOptions {
    /// New fill colour
    pub color: Option<String>,
    /// Enable/disable moving; also switches the cursor
    pub drag: Option<bool>,
    /// New start; a marker's end follows its start unless `end` is given
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Replace the label
    pub content: Option<RegionContent>,
    /// Rename; the `part` tag follows
    pub id: Option<String>,
    /// Enable/disable resizing; adds or removes the two edge handles
    pub resize: Option<bool>,
}
