//! In-memory host page.
//!
//! Models just enough of the host document for the reconciler: a toolbar with
//! an optional items container, the classifier's marker elements, injected
//! controls and the stylesheet. The host's own re-rendering can be simulated
//! by tearing the toolbar down and rendering it again.

use std::cell::RefCell;

use prfilter_core::ControlView;
use url::Url;

use crate::selectors::{
    CONTROL_SELECTOR, ISSUES_FRAME_SELECTOR, LIST_CONTAINER_SELECTOR, TOOLBAR_ITEMS_SELECTOR,
    TOOLBAR_SELECTOR,
};
use crate::{DomError, HostDocument};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNodeKind {
    Toolbar,
    ToolbarItems,
    /// One of the host's own toolbar entries.
    HostItem,
    Control {
        menu_open: bool,
        view: Option<ControlView>,
    },
    Stylesheet,
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: MemoryNodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

#[derive(Debug, Default)]
struct Inner {
    url: String,
    nodes: Vec<MemoryNode>,
    has_list_container: bool,
    has_issues_frame: bool,
    fail_inserts: bool,
    navigations: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    inner: RefCell<Inner>,
}

impl MemoryDocument {
    pub fn new(url: impl Into<String>) -> Self {
        let doc = Self::default();
        doc.inner.borrow_mut().url = url.into();
        doc
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.inner.borrow_mut().url = url.into();
    }

    pub fn set_list_container(&self, present: bool) {
        self.inner.borrow_mut().has_list_container = present;
    }

    pub fn set_issues_frame(&self, present: bool) {
        self.inner.borrow_mut().has_issues_frame = present;
    }

    /// Makes every following `prepend` fail, as if the host refused the node.
    pub fn fail_inserts(&self, fail: bool) {
        self.inner.borrow_mut().fail_inserts = fail;
    }

    /// Renders a toolbar at the document root. Returns the toolbar and, when
    /// requested, its items container.
    pub fn render_toolbar(&self, with_items: bool) -> (NodeId, Option<NodeId>) {
        let mut inner = self.inner.borrow_mut();
        let toolbar = inner.push_node(MemoryNodeKind::Toolbar, None);
        let items =
            with_items.then(|| inner.push_node(MemoryNodeKind::ToolbarItems, Some(toolbar)));
        (toolbar, items)
    }

    pub fn add_host_item(&self, parent: NodeId) -> NodeId {
        self.inner
            .borrow_mut()
            .push_node(MemoryNodeKind::HostItem, Some(parent))
    }

    /// Drops every toolbar along with anything inside it, the way the host
    /// replaces its content on in-place navigation.
    pub fn tear_down_toolbar(&self) {
        let mut inner = self.inner.borrow_mut();
        let toolbars: Vec<NodeId> = inner
            .attached_ids()
            .filter(|id| inner.nodes[*id].kind == MemoryNodeKind::Toolbar)
            .collect();
        for toolbar in toolbars {
            inner.detach(toolbar);
        }
    }

    pub fn control_count(&self) -> usize {
        self.inner.borrow().attached_controls().len()
    }

    pub fn stylesheet_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner
            .attached_ids()
            .filter(|id| inner.nodes[*id].kind == MemoryNodeKind::Stylesheet)
            .count()
    }

    /// View applied to the first live control.
    pub fn control_view(&self) -> Option<ControlView> {
        let inner = self.inner.borrow();
        inner
            .attached_controls()
            .first()
            .and_then(|id| match &inner.nodes[*id].kind {
                MemoryNodeKind::Control { view, .. } => view.clone(),
                _ => None,
            })
    }

    pub fn control_menu_open(&self) -> bool {
        let inner = self.inner.borrow();
        inner
            .attached_controls()
            .first()
            .is_some_and(|id| {
                matches!(inner.nodes[*id].kind, MemoryNodeKind::Control { menu_open: true, .. })
            })
    }

    pub fn children_of(&self, parent: NodeId) -> Vec<MemoryNodeKind> {
        let inner = self.inner.borrow();
        inner.nodes[parent]
            .children
            .iter()
            .map(|id| inner.nodes[*id].kind.clone())
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.borrow().navigations.clone()
    }

    fn node_exists(&self, node: NodeId) -> Result<(), DomError> {
        if node < self.inner.borrow().nodes.len() {
            Ok(())
        } else {
            Err(DomError::Remove(format!("unknown node {node}")))
        }
    }

    fn with_control<T>(
        &self,
        control: NodeId,
        f: impl FnOnce(&mut bool, &mut Option<ControlView>) -> T,
    ) -> Result<T, DomError> {
        let mut inner = self.inner.borrow_mut();
        match inner.nodes.get_mut(control).map(|node| &mut node.kind) {
            Some(MemoryNodeKind::Control { menu_open, view }) => Ok(f(menu_open, view)),
            _ => Err(DomError::Style(format!("node {control} is not a control"))),
        }
    }
}

impl Inner {
    fn push_node(&mut self, kind: MemoryNodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        let attached = parent.map_or(true, |p| self.nodes[p].attached);
        self.nodes.push(MemoryNode {
            kind,
            parent,
            children: Vec::new(),
            attached,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    fn attached_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).filter(|id| self.nodes[*id].attached)
    }

    fn attached_controls(&self) -> Vec<NodeId> {
        self.attached_ids()
            .filter(|id| matches!(self.nodes[*id].kind, MemoryNodeKind::Control { .. }))
            .collect()
    }

    fn first_attached(&self, kind: &MemoryNodeKind) -> Option<NodeId> {
        self.attached_ids().find(|id| &self.nodes[*id].kind == kind)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|child| *child != node);
        }
        self.mark_detached(node);
    }

    fn mark_detached(&mut self, node: NodeId) {
        self.nodes[node].attached = false;
        let children = self.nodes[node].children.clone();
        for child in children {
            self.mark_detached(child);
        }
    }

    fn mark_attached(&mut self, node: NodeId) {
        self.nodes[node].attached = true;
        let children = self.nodes[node].children.clone();
        for child in children {
            self.mark_attached(child);
        }
    }
}

impl HostDocument for MemoryDocument {
    type Node = NodeId;

    fn current_url(&self) -> String {
        self.inner.borrow().url.clone()
    }

    fn path(&self) -> String {
        Url::parse(&self.current_url())
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }

    fn query(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        let inner = self.inner.borrow();
        match selector {
            TOOLBAR_SELECTOR => Ok(inner.first_attached(&MemoryNodeKind::Toolbar)),
            CONTROL_SELECTOR => Ok(inner.attached_controls().first().copied()),
            // Marker elements are flags only; any id stands in for them.
            LIST_CONTAINER_SELECTOR => Ok(inner.has_list_container.then_some(usize::MAX)),
            ISSUES_FRAME_SELECTOR => Ok(inner.has_issues_frame.then_some(usize::MAX)),
            other => Err(DomError::selector(other, "not modelled by MemoryDocument")),
        }
    }

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        match selector {
            CONTROL_SELECTOR => Ok(self.inner.borrow().attached_controls()),
            other => Ok(self.query(other)?.into_iter().collect()),
        }
    }

    fn query_in(&self, parent: &NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        if selector != TOOLBAR_ITEMS_SELECTOR {
            return Err(DomError::selector(selector, "not modelled inside elements"));
        }
        let inner = self.inner.borrow();
        Ok(inner.nodes.get(*parent).and_then(|node| {
            node.children
                .iter()
                .copied()
                .find(|child| inner.nodes[*child].kind == MemoryNodeKind::ToolbarItems)
        }))
    }

    fn remove(&self, node: &NodeId) -> Result<(), DomError> {
        self.node_exists(*node)?;
        self.inner.borrow_mut().detach(*node);
        Ok(())
    }

    fn prepend(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_inserts {
            return Err(DomError::Insert("insertion refused".into()));
        }
        if *parent >= inner.nodes.len() || *child >= inner.nodes.len() {
            return Err(DomError::Insert(format!("unknown node {parent} or {child}")));
        }
        inner.detach(*child);
        inner.nodes[*child].parent = Some(*parent);
        inner.nodes[*parent].children.insert(0, *child);
        if inner.nodes[*parent].attached {
            inner.mark_attached(*child);
        }
        Ok(())
    }

    fn create_control(&self) -> Result<NodeId, DomError> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.push_node(
            MemoryNodeKind::Control {
                menu_open: false,
                view: None,
            },
            None,
        );
        // Created detached; only `prepend` puts it in the document.
        inner.nodes[id].attached = false;
        Ok(id)
    }

    fn ensure_stylesheet(&self) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        if inner.first_attached(&MemoryNodeKind::Stylesheet).is_none() {
            inner.push_node(MemoryNodeKind::Stylesheet, None);
        }
        Ok(())
    }

    fn apply_view(&self, control: &NodeId, next: &ControlView) -> Result<(), DomError> {
        self.with_control(*control, |_, view| *view = Some(next.clone()))
    }

    fn menu_open(&self, control: &NodeId) -> bool {
        self.with_control(*control, |open, _| *open).unwrap_or(false)
    }

    fn set_menu_open(&self, control: &NodeId, open: bool) -> Result<(), DomError> {
        self.with_control(*control, |menu_open, _| *menu_open = open)
    }

    fn navigate(&self, url: &str) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        inner.navigations.push(url.to_string());
        inner.url = url.to_string();
        Ok(())
    }
}
