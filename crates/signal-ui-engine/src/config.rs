//! Widget options.
//!
//! [`WidgetOptions`] is the option surface a rendering adapter receives from
//! markup attributes or framework props. Every key is optional and uses the
//! camelCase names of the attribute surface; a missing key falls back to the
//! widget default. Options can be loaded from TOML or JSON and converted into
//! the typed configuration of each controller.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::config::WidgetOptions;
//!
//! let options = WidgetOptions::from_json_str(
//!     r#"{ "mode": "multi", "maxSelected": 2, "creatable": true }"#,
//! ).unwrap();
//!
//! let config = options.combobox_config().unwrap();
//! assert_eq!(config.max_selected, Some(2));
//! assert!(config.creatable);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::SelectionMode;
use crate::widget::combobox::ComboboxConfig;
use crate::widget::gesture::{SizeBounds, SurfaceConfig};
use crate::widget::input::{Point, Size};
use crate::widget::modal::ModalConfig;
use crate::widget::table::TableConfig;

/// Recognized widget options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetOptions {
    pub mode: Option<SelectionMode>,
    pub searchable: Option<bool>,
    pub filterable: Option<bool>,
    pub selectable: Option<bool>,
    pub creatable: Option<bool>,
    pub clearable: Option<bool>,
    pub disabled: Option<bool>,
    pub sortable: Option<bool>,
    pub max_selected: Option<usize>,
    pub close_on_select: Option<bool>,
    pub reorderable: Option<bool>,
    pub page_size: Option<usize>,
    pub draggable: Option<bool>,
    pub resizable: Option<bool>,
    pub fullscreen: Option<bool>,
    pub close_on_backdrop: Option<bool>,
    pub close_on_esc: Option<bool>,
    pub min_size: Option<Size>,
    pub max_size: Option<Size>,
    pub default_size: Option<Size>,
    pub default_position: Option<Point>,
}

impl WidgetOptions {
    /// Parses options from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Parses options from a JSON object.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the values no controller would accept.
    pub fn validate(&self) -> Result<()> {
        if self.max_selected == Some(0) {
            return Err(EngineError::InvalidMaxSelected);
        }
        if self.page_size == Some(0) {
            return Err(EngineError::InvalidPageSize);
        }
        if let Some(size) = self.default_size.filter(|size| !size.is_valid()) {
            return Err(EngineError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        if let Some(point) = self.default_position.filter(|point| !point.is_finite()) {
            return Err(EngineError::InvalidPosition {
                x: point.x,
                y: point.y,
            });
        }
        self.size_bounds().map(|_| ())
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Combobox configuration.
    pub fn combobox_config(&self) -> Result<ComboboxConfig> {
        self.validate()?;
        let defaults = ComboboxConfig::default();
        Ok(ComboboxConfig {
            mode: self.mode.unwrap_or(defaults.mode),
            searchable: self.searchable.unwrap_or(defaults.searchable),
            creatable: self.creatable.unwrap_or(defaults.creatable),
            clearable: self.clearable.unwrap_or(defaults.clearable),
            disabled: self.disabled.unwrap_or(defaults.disabled),
            max_selected: self.max_selected,
            close_on_select: self.close_on_select,
        })
    }

    /// Data table configuration.
    pub fn table_config(&self) -> Result<TableConfig> {
        self.validate()?;
        let defaults = TableConfig::default();
        Ok(TableConfig {
            searchable: self.searchable.unwrap_or(defaults.searchable),
            filterable: self.filterable.unwrap_or(defaults.filterable),
            selectable: self.selectable.unwrap_or(defaults.selectable),
            sortable: self.sortable.unwrap_or(defaults.sortable),
            reorderable: self.reorderable.unwrap_or(defaults.reorderable),
            page_size: self.page_size,
            max_selected: self.max_selected,
        })
    }

    /// Movable surface configuration.
    pub fn surface_config(&self) -> Result<SurfaceConfig> {
        self.validate()?;
        let defaults = SurfaceConfig::default();
        Ok(SurfaceConfig {
            draggable: self.draggable.unwrap_or(defaults.draggable),
            resizable: self.resizable.unwrap_or(defaults.resizable),
            fullscreen: self.fullscreen.unwrap_or(defaults.fullscreen),
            bounds: self.size_bounds()?,
            default_size: self.default_size.unwrap_or(defaults.default_size),
            default_position: self.default_position.unwrap_or(defaults.default_position),
        })
    }

    /// Modal configuration.
    pub fn modal_config(&self) -> Result<ModalConfig> {
        let defaults = ModalConfig::default();
        Ok(ModalConfig {
            close_on_backdrop: self.close_on_backdrop.unwrap_or(defaults.close_on_backdrop),
            close_on_esc: self.close_on_esc.unwrap_or(defaults.close_on_esc),
            surface: self.surface_config()?,
        })
    }

    fn size_bounds(&self) -> Result<SizeBounds> {
        SizeBounds::new(
            self.min_size.unwrap_or(SurfaceConfig::DEFAULT_MIN_SIZE),
            self.max_size.unwrap_or(SurfaceConfig::DEFAULT_MAX_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_use_defaults() {
        let options = WidgetOptions::from_json_str("{}").unwrap();
        assert_eq!(options, WidgetOptions::default());

        let combobox = options.combobox_config().unwrap();
        assert_eq!(combobox.mode, SelectionMode::Single);
        assert!(combobox.searchable);

        let table = options.table_config().unwrap();
        assert!(table.sortable);
        assert!(!table.selectable);

        let modal = options.modal_config().unwrap();
        assert!(modal.close_on_backdrop);
        assert!(modal.close_on_esc);
        assert!(!modal.surface.draggable);
        assert_eq!(modal.surface.default_size, SurfaceConfig::DEFAULT_SIZE);
    }

    #[test]
    fn test_toml_options() {
        let options = WidgetOptions::from_toml_str(
            r#"
            draggable = true
            resizable = true
            closeOnEsc = false
            minSize = { width = 200.0, height = 100.0 }
            defaultPosition = { x = 40.0, y = 60.0 }
            "#,
        )
        .unwrap();

        let modal = options.modal_config().unwrap();
        assert!(!modal.close_on_esc);
        assert!(modal.surface.draggable);
        assert_eq!(modal.surface.bounds.min(), Size::new(200.0, 100.0));
        assert_eq!(modal.surface.bounds.max(), SurfaceConfig::DEFAULT_MAX_SIZE);
        assert_eq!(modal.surface.default_position, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_table_options() {
        let options =
            WidgetOptions::from_json_str(r#"{ "selectable": true, "pageSize": 25, "sortable": false }"#)
                .unwrap();
        let table = options.table_config().unwrap();
        assert!(table.selectable);
        assert!(!table.sortable);
        assert_eq!(table.page_size, Some(25));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert_eq!(
            WidgetOptions::from_json_str(r#"{ "maxSelected": 0 }"#),
            Err(EngineError::InvalidMaxSelected)
        );
        assert_eq!(
            WidgetOptions::from_toml_str("pageSize = 0"),
            Err(EngineError::InvalidPageSize)
        );
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let options = WidgetOptions {
            min_size: Some(Size::new(800.0, 600.0)),
            max_size: Some(Size::new(400.0, 300.0)),
            ..WidgetOptions::default()
        };
        assert!(matches!(
            options.surface_config(),
            Err(EngineError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_non_finite_sizes_rejected() {
        let nan_bounds = WidgetOptions::from_toml_str(
            r#"
            resizable = true
            minSize = { width = nan, height = 100.0 }
            "#,
        );
        assert!(matches!(nan_bounds, Err(EngineError::InvalidBounds { .. })));

        let infinite_max = WidgetOptions::from_toml_str("maxSize = { width = inf, height = 900.0 }");
        assert!(matches!(infinite_max, Err(EngineError::InvalidBounds { .. })));

        let negative_default =
            WidgetOptions::from_json_str(r#"{ "defaultSize": { "width": -5.0, "height": 300.0 } }"#);
        assert!(matches!(
            negative_default,
            Err(EngineError::InvalidSize { .. })
        ));

        let nan_position = WidgetOptions::from_toml_str("defaultPosition = { x = nan, y = 0.0 }");
        assert!(matches!(
            nan_position,
            Err(EngineError::InvalidPosition { .. })
        ));

        let options = WidgetOptions {
            default_size: Some(Size::new(f64::INFINITY, 100.0)),
            ..WidgetOptions::default()
        };
        assert!(options.modal_config().is_err());
    }

    #[test]
    fn test_malformed_input_is_config_error() {
        assert!(matches!(
            WidgetOptions::from_json_str(r#"{ "mode": "several" }"#),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            WidgetOptions::from_toml_str("searchable = \"yes\""),
            Err(EngineError::Config(_))
        ));
    }
}
