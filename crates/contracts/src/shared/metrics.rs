use serde::{Deserialize, Serialize};

/// A selectable metric: an alternate chart dataset or an optional table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Unique within one metric set (e.g., "cpc", "video_views")
    pub id: String,
    pub label: String,
    /// `None` when the source data leaves the flag out
    #[serde(default, alias = "defaultVisible")]
    pub default_visible: Option<bool>,
}

impl MetricDescriptor {
    pub fn new(id: &str, label: &str, default_visible: Option<bool>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            default_visible,
        }
    }

    /// Chart metric menus treat a missing flag as visible
    pub fn is_visible_by_default(&self) -> bool {
        self.default_visible != Some(false)
    }

    /// Optional table columns start hidden unless explicitly flagged
    pub fn is_initially_selected(&self) -> bool {
        self.default_visible == Some(true)
    }
}
