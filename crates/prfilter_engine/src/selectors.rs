//! Selectors and attributes shared by every document implementation.

/// Marks every instance of the injected control.
pub const CONTROL_ATTR: &str = "data-action-bar-item";
pub const CONTROL_ATTR_VALUE: &str = "pr-filter";
pub const CONTROL_SELECTOR: &str = r#"[data-action-bar-item="pr-filter"]"#;

pub const TOOLBAR_SELECTOR: &str = r#"[role="toolbar"]"#;
/// Preferred insertion point inside the toolbar.
pub const TOOLBAR_ITEMS_SELECTOR: &str = ".VisibleItems-module__Box_1--_dgKR";
pub const LIST_CONTAINER_SELECTOR: &str =
    "div.js-navigation-container.js-active-navigation-container";
pub const ISSUES_FRAME_SELECTOR: &str = r#"turbo-frame[src*="/issues"]"#;

pub const STYLESHEET_ID: &str = "pr-filter-css";
pub const BUTTON_CLASS: &str = "pr-filter-button";
pub const MENU_CLASS: &str = "pr-filter-menu";
pub const MENU_ITEM_CLASS: &str = "pr-filter-menu-item";
pub const CHECK_ICON_CLASS: &str = "check-icon";
/// Option elements carry their `FilterState` key in this attribute.
pub const FILTER_ATTR: &str = "data-filter";

pub const BUTTON_SELECTOR: &str = ".pr-filter-button";
pub const MENU_SELECTOR: &str = ".pr-filter-menu";
pub const MENU_ITEM_SELECTOR: &str = ".pr-filter-menu-item";
pub const CHECK_ICON_SELECTOR: &str = ".check-icon";
