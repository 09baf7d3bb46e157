use prfilter_core::{
    classify, first_structural_change, is_issues_list_path, is_structural_change,
    is_target_view, MutationKind, MutationView, PageSnapshot, Signal,
};

#[test]
fn list_paths_are_target_views() {
    for path in [
        "/octo/hello/issues",
        "/octo/hello/issues/",
        "/octo/hello-world/issues",
    ] {
        assert!(is_target_view(&PageSnapshot::from_path(path)), "{path}");
    }
}

#[test]
fn detail_and_sub_pages_are_not_target_views() {
    for path in [
        "/octo/hello/issues/42",
        "/octo/hello/issues/labels",
        "/octo/hello/issues/new",
        "/octo/hello/pulls",
        "/octo/hello",
        "/issues",
        "/",
        "",
    ] {
        assert!(!is_target_view(&PageSnapshot::from_path(path)), "{path}");
    }
}

#[test]
fn list_path_requires_owner_and_repo() {
    assert!(!is_issues_list_path("//hello/issues"));
    assert!(!is_issues_list_path("/octo//issues"));
}

#[test]
fn container_signal_needs_toolbar_too() {
    let mut page = PageSnapshot::from_path("/octo/hello/issues/42");
    page.has_list_container = true;
    assert!(!is_target_view(&page));

    page.has_toolbar = true;
    let classification = classify(&page);
    assert!(classification.is_target_view);
    assert_eq!(classification.signal, Some(Signal::ListContainer));
}

#[test]
fn issues_frame_alone_is_enough() {
    let page = PageSnapshot {
        path: "/octo/hello".into(),
        has_issues_frame: true,
        ..PageSnapshot::default()
    };
    let classification = classify(&page);
    assert!(classification.is_target_view);
    assert_eq!(classification.signal, Some(Signal::IssuesFrame));
}

#[test]
fn no_signal_means_no_target() {
    let classification = classify(&PageSnapshot::from_path("/octo/hello/pulls"));
    assert!(!classification.is_target_view);
    assert_eq!(classification.signal, None);
}

#[test]
fn structural_changes_are_child_list_on_navigation_containers() {
    assert!(is_structural_change(&MutationView::child_list(
        "repo-content-turbo-frame"
    )));
    assert!(is_structural_change(&MutationView::child_list(
        "repo-content-pjax-container"
    )));
    assert!(!is_structural_change(&MutationView::child_list("js-repo-pjax-container")));
    assert!(!is_structural_change(&MutationView {
        kind: MutationKind::Attributes,
        target_id: "repo-content-turbo-frame".into(),
    }));
}

#[test]
fn batch_reports_first_structural_change_only() {
    let batch = vec![
        MutationView::child_list("sidebar"),
        MutationView::child_list("repo-content-pjax-container"),
        MutationView::child_list("repo-content-turbo-frame"),
    ];
    assert_eq!(
        first_structural_change(&batch),
        Some("repo-content-pjax-container")
    );
    assert_eq!(first_structural_change(&batch[..1]), None);
}
