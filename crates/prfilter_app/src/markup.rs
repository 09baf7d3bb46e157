//! Markup and stylesheet of the injected control.

use prfilter_core::FilterState;
use prfilter_engine::selectors::{
    BUTTON_CLASS, CHECK_ICON_CLASS, FILTER_ATTR, MENU_CLASS, MENU_ITEM_CLASS,
};

/// Class of the control's wrapper, shared with the host's own toolbar items so
/// the control lines up with them.
pub const CONTAINER_CLASS: &str = "VisibleItem-module__Box_0--wJA9C pr-filter-container";

const BUTTON_LABEL: &str = "Linked PR";

pub fn option_label(filter: FilterState) -> &'static str {
    match filter {
        FilterState::None => "No filter",
        FilterState::WithLink => "Issues with linked PR",
        FilterState::WithoutLink => "Issues without linked PR",
    }
}

/// Inner HTML of a control instance: the trigger button followed by a hidden
/// menu with one option per filter.
pub fn control_html() -> String {
    let options: String = FilterState::ALL
        .into_iter()
        .map(|filter| {
            format!(
                r#"<li role="menuitemradio" class="{MENU_ITEM_CLASS}" {FILTER_ATTR}="{key}"><span class="{CHECK_ICON_CLASS}">&#10003;</span><span>{label}</span></li>"#,
                key = filter.key(),
                label = option_label(filter),
            )
        })
        .collect();
    format!(
        r#"<button type="button" class="{BUTTON_CLASS}" aria-haspopup="true" aria-expanded="false">{BUTTON_LABEL} &#9662;</button><ul role="menu" class="{MENU_CLASS}" style="display: none">{options}</ul>"#
    )
}

pub const STYLESHEET: &str = r#"
.pr-filter-container { position: relative; display: inline-flex; }
.pr-filter-button {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  height: 32px;
  padding: 0 12px;
  font-size: 14px;
  font-weight: 500;
  border: 1px solid var(--borderColor-default, #d0d7de);
  border-radius: 6px;
  background-color: var(--button-default-bgColor-rest, #f6f8fa);
  color: var(--fgColor-default, #1f2328);
  cursor: pointer;
}
.pr-filter-button:hover { background-color: var(--button-default-bgColor-hover, #f3f4f6); }
.pr-filter-menu {
  position: absolute;
  top: 100%;
  left: 0;
  z-index: 100;
  min-width: 220px;
  margin: 4px 0 0;
  padding: 4px 0;
  list-style: none;
  border: 1px solid var(--borderColor-default, #d0d7de);
  border-radius: 6px;
  background-color: var(--overlay-bgColor, #ffffff);
  box-shadow: var(--shadow-floating-large, 0 8px 24px rgba(140, 149, 159, 0.2));
}
.pr-filter-menu-item {
  display: flex;
  align-items: center;
  gap: 8px;
  padding: 6px 12px;
  font-size: 14px;
  cursor: pointer;
}
.pr-filter-menu-item:hover { background-color: var(--bgColor-muted, #f6f8fa); }
.pr-filter-menu-item .check-icon { width: 16px; visibility: hidden; }
"#;
