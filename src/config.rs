//! Declarative layout configuration.
//!
//! Hosts that load layouts from data (JSON, TOML, ...) deserialize a
//! [`LayoutConfig`] and instantiate it. Sizes may be numbers or numeric strings:
//!
//! ```json
//! {
//!   "overlaps": ["bar:drawer"],
//!   "fullHeight": true,
//!   "regions": [
//!     { "id": "bar", "position": "top", "layoutSize": 64 },
//!     { "id": "drawer", "position": "left", "layoutSize": "256", "order": -1 }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::engine::LayoutRegistry;
use crate::error::{LayoutError, Result};
use crate::primitives::{
    create_layout, use_layout_item, LayoutHandle, LayoutItemHandle, LayoutItemProps, LayoutProps,
    PropValue,
};
use crate::types::{Position, TreePath};

/// A size given as a number or a string-encoded number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Number(f64),
    Text(String),
}

impl SizeValue {
    /// Resolve to a finite, non-negative number. `id` names the region in errors.
    pub fn resolve(&self, id: &str) -> Result<f64> {
        let invalid = || LayoutError::InvalidSize {
            id: id.to_string(),
            value: self.to_string(),
        };
        let size = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        };
        if size.is_finite() && size >= 0.0 {
            Ok(size)
        } else {
            Err(invalid())
        }
    }
}

impl std::fmt::Display for SizeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn default_position() -> String {
    Position::Top.as_str().to_string()
}

fn default_active() -> bool {
    true
}

/// One region as configured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_position")]
    pub position: String,
    pub layout_size: SizeValue,
    #[serde(default)]
    pub element_size: Option<SizeValue>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub absolute: bool,
    #[serde(default)]
    pub disable_transitions: Option<bool>,
    #[serde(default)]
    pub tree_path: Option<Vec<u32>>,
}

impl RegionConfig {
    /// Validate and convert into static props.
    pub fn into_props(self) -> Result<LayoutItemProps> {
        let label = self.id.clone().unwrap_or_else(|| "<unnamed>".to_string());
        let position: Position = self.position.parse()?;
        let layout_size = self.layout_size.resolve(&label)?;
        let element_size = self
            .element_size
            .as_ref()
            .map(|size| size.resolve(&label))
            .transpose()?;

        Ok(LayoutItemProps {
            id: self.id,
            tree_path: self.tree_path.map(TreePath::from),
            order: PropValue::Static(self.order),
            position: PropValue::Static(position),
            layout_size: PropValue::Static(layout_size),
            element_size: PropValue::Static(element_size),
            active: PropValue::Static(self.active),
            absolute: PropValue::Static(self.absolute),
            disable_transitions: self.disable_transitions.map(PropValue::Static),
        })
    }
}

/// A layout and its regions as configured.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub overlaps: Vec<String>,
    pub full_height: bool,
    pub regions: Vec<RegionConfig>,
}

impl LayoutConfig {
    pub fn layout_props(&self) -> LayoutProps {
        LayoutProps {
            overlaps: PropValue::Static(self.overlaps.clone()),
            full_height: self.full_height,
        }
    }

    /// Create the layout and register every region, in the configured order.
    ///
    /// All regions are validated before anything is created.
    pub fn instantiate(
        self,
        parent: Option<&LayoutRegistry>,
    ) -> Result<(LayoutHandle, Vec<LayoutItemHandle>)> {
        let layout = create_layout(self.layout_props(), parent);
        let props = self
            .regions
            .into_iter()
            .map(RegionConfig::into_props)
            .collect::<Result<Vec<_>>>()?;

        let items = props
            .into_iter()
            .map(|props| use_layout_item(Some(layout.registry()), props))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(regions = items.len(), "instantiated layout from config");
        Ok((layout, items))
    }
}
