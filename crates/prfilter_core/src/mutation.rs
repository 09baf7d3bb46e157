/// Ids of the containers the host swaps wholesale when it navigates in place.
pub const NAVIGATION_CONTAINER_IDS: [&str; 2] =
    ["repo-content-pjax-container", "repo-content-turbo-frame"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
    CharacterData,
}

/// The part of a DOM mutation record the structural-change detector looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationView {
    pub kind: MutationKind,
    pub target_id: String,
}

impl MutationView {
    pub fn child_list(target_id: impl Into<String>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target_id: target_id.into(),
        }
    }
}

/// A child-list change directly on a navigation container.
pub fn is_structural_change(mutation: &MutationView) -> bool {
    mutation.kind == MutationKind::ChildList
        && NAVIGATION_CONTAINER_IDS.contains(&mutation.target_id.as_str())
}

/// Returns the container id of the first structural change in a batch.
///
/// A batch fires at most one re-evaluation no matter how many records match.
pub fn first_structural_change<'a, I>(batch: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a MutationView>,
{
    batch
        .into_iter()
        .find(|mutation| is_structural_change(mutation))
        .map(|mutation| mutation.target_id.as_str())
}
