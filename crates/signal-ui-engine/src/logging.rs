//! Logging facilities for the widget engine.
//!
//! The engine is instrumented with the `tracing` crate and never installs a
//! subscriber itself. Rendering adapters that want to see engine logs install
//! one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("signal_ui_engine::combobox=debug")
//!     .init();
//! ```
//!
//! State transitions and rejected mutations are logged at `debug`, per-move
//! geometry updates at `trace`, and boundary anomalies (such as popping an
//! overlay token twice) at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Engine root target.
    pub const ENGINE: &str = "signal_ui_engine";
    /// Selection store target.
    pub const SELECTION: &str = "signal_ui_engine::selection";
    /// List query pipeline target.
    pub const QUERY: &str = "signal_ui_engine::query";
    /// Combobox controller target.
    pub const COMBOBOX: &str = "signal_ui_engine::combobox";
    /// Data table controller target.
    pub const TABLE: &str = "signal_ui_engine::table";
    /// Drag/resize geometry target.
    pub const GESTURE: &str = "signal_ui_engine::gesture";
    /// Focus scope target.
    pub const FOCUS: &str = "signal_ui_engine::focus";
    /// Overlay stack and scroll lock target.
    pub const OVERLAY: &str = "signal_ui_engine::overlay";
    /// Modal controller target.
    pub const MODAL: &str = "signal_ui_engine::modal";
    /// Shortcut matching target.
    pub const SHORTCUT: &str = "signal_ui_engine::shortcut";
}
