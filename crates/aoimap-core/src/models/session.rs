use serde::{Deserialize, Serialize};

use super::area::Area;

/// Base layer shown by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapView {
    #[default]
    Street,
    Satellite,
}

impl MapView {
    pub fn toggled(self) -> Self {
        match self {
            MapView::Street => MapView::Satellite,
            MapView::Satellite => MapView::Street,
        }
    }
}

/// Which sidebar panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "define-aoi")]
    DefineAoi,
    #[serde(rename = "project-scope")]
    ProjectScope,
}

/// The persisted session state, written as one unit on every change.
///
/// Every field defaults independently so that hydration can adopt whatever
/// subset a stored snapshot carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub map_view: MapView,
    #[serde(default)]
    pub view_mode: ViewMode,
}
