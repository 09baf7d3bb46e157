use prfilter_app::markup::{control_html, option_label, STYLESHEET};
use prfilter_core::FilterState;

#[test]
fn every_filter_has_an_option() {
    let html = control_html();
    for filter in FilterState::ALL {
        assert!(
            html.contains(&format!(r#"data-filter="{}""#, filter.key())),
            "missing option for {filter}"
        );
        assert!(html.contains(option_label(filter)));
    }
    assert_eq!(html.matches("check-icon").count(), FilterState::ALL.len());
}

#[test]
fn menu_starts_closed() {
    let html = control_html();
    assert!(html.contains(r#"class="pr-filter-menu" style="display: none""#));
    assert!(html.contains(r#"aria-expanded="false""#));
}

#[test]
fn stylesheet_hides_check_markers_by_default() {
    assert!(STYLESHEET.contains(".pr-filter-menu-item .check-icon { width: 16px; visibility: hidden; }"));
}
