//! Nested-target resolution
//!
//! The view presented as the nested-scroll target is rarely the view whose
//! offset matters: a pull-to-refresh wrapper hides its list one level down,
//! and a plain container may hold the scrollable anywhere in its subtree.
//! The resolver unwraps those layers to the actual scrollable content and
//! reports its current vertical offset.
//!
//! Views are modeled as a tree of tagged nodes rather than platform types;
//! offset accounting per tag lives in a registered-strategy table, so an
//! integrator can override how any kind of node reports its offset.

use rustc_hash::FxHashMap;

/// Stable identity of a node in the presented view tree
pub type NodeId = u64;

/// The closed set of view kinds the resolver recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Pull-to-refresh wrapper with a designated content view
    RefreshWrapper,
    /// Generic container; scrollable content may sit anywhere below it
    Container,
    /// A view that participates in nested scrolling with a raw pixel offset
    NestedChild,
    /// A virtualized list; its offset is computed from item accounting, not
    /// raw pixels
    VirtualList,
    /// A leaf with no scrolling capability
    Plain,
}

/// Offset accounting for a virtualized list
///
/// Mirrors list-style computed offsets: items fully above the viewport times
/// their extent, plus the pixel offset into the first visible item.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualListState {
    pub items_above: u32,
    pub item_extent: i32,
    pub pixel_offset: i32,
}

impl VirtualListState {
    pub fn computed_offset(&self) -> i32 {
        self.items_above as i32 * self.item_extent + self.pixel_offset
    }
}

/// One node of the presented target tree
#[derive(Debug)]
pub struct TargetNode {
    pub id: NodeId,
    pub kind: TargetKind,
    /// Raw vertical scroll offset in pixels
    pub scroll_offset: i32,
    /// Item accounting, for [`TargetKind::VirtualList`] nodes
    pub virtual_state: Option<VirtualListState>,
    /// Which child is the designated content view, for refresh wrappers
    pub content_index: Option<usize>,
    pub children: Vec<TargetNode>,
}

impl TargetNode {
    pub fn new(id: NodeId, kind: TargetKind) -> Self {
        Self {
            id,
            kind,
            scroll_offset: 0,
            virtual_state: None,
            content_index: None,
            children: Vec::new(),
        }
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn with_virtual_state(mut self, state: VirtualListState) -> Self {
        self.virtual_state = Some(state);
        self
    }

    pub fn with_content_index(mut self, index: usize) -> Self {
        self.content_index = Some(index);
        self
    }

    pub fn child(mut self, child: TargetNode) -> Self {
        self.children.push(child);
        self
    }

    /// Designated content view of a refresh wrapper
    pub fn content_view(&self) -> Option<&TargetNode> {
        self.content_index.and_then(|i| self.children.get(i))
    }

    /// Whether this node itself participates in nested scrolling
    pub fn is_nested_capable(&self) -> bool {
        matches!(self.kind, TargetKind::NestedChild | TargetKind::VirtualList)
    }

    fn find_by_id(&self, id: NodeId) -> Option<&TargetNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }
}

/// Strategy computing a node's reported vertical offset
pub type OffsetStrategy = fn(&TargetNode) -> i32;

fn raw_offset(node: &TargetNode) -> i32 {
    node.scroll_offset
}

fn virtual_offset(node: &TargetNode) -> i32 {
    node.virtual_state
        .map(|state| state.computed_offset())
        .unwrap_or(node.scroll_offset)
}

/// Resolves the presented nested-scroll target to its actual scrollable
/// content and reports that content's offset
///
/// The resolution is memoized by the identity of the presented node and
/// invalidated whenever a different node is presented. The cache never owns
/// the view; it is a pure id lookup.
pub struct NestedTargetResolver {
    strategies: FxHashMap<TargetKind, OffsetStrategy>,
    /// (presented node id, resolved node id)
    cache: Option<(NodeId, NodeId)>,
}

impl Default for NestedTargetResolver {
    fn default() -> Self {
        let mut strategies = FxHashMap::default();
        strategies.insert(TargetKind::VirtualList, virtual_offset as OffsetStrategy);
        strategies.insert(TargetKind::NestedChild, raw_offset as OffsetStrategy);
        strategies.insert(TargetKind::RefreshWrapper, raw_offset as OffsetStrategy);
        Self {
            strategies,
            cache: None,
        }
    }
}

impl NestedTargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or extend the offset strategy for a node kind.
    pub fn register_strategy(&mut self, kind: TargetKind, strategy: OffsetStrategy) {
        self.strategies.insert(kind, strategy);
    }

    /// Drop the memoized resolution.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Locate the actual scrollable content under `presented`.
    ///
    /// Refresh wrappers descend into their designated content first, then
    /// scan remaining nested-capable children, and fall back to the wrapper
    /// itself; containers search depth-first; a nested-capable node resolves
    /// to itself.
    pub fn resolve<'t>(&mut self, presented: &'t TargetNode) -> Option<&'t TargetNode> {
        if let Some((cached_presented, cached_resolved)) = self.cache {
            if cached_presented == presented.id {
                if let Some(node) = presented.find_by_id(cached_resolved) {
                    return Some(node);
                }
                // Stale cache: the subtree changed under the same presented id.
                self.cache = None;
            } else {
                self.cache = None;
            }
        }
        let resolved = Self::locate(presented);
        if let Some(node) = resolved {
            self.cache = Some((presented.id, node.id));
        } else {
            tracing::debug!(presented = presented.id, "no scrollable content found");
        }
        resolved
    }

    fn locate(node: &TargetNode) -> Option<&TargetNode> {
        match node.kind {
            TargetKind::RefreshWrapper => {
                if let Some(content) = node.content_view() {
                    if let Some(found) = Self::locate(content) {
                        return Some(found);
                    }
                }
                for child in &node.children {
                    if child.is_nested_capable() {
                        if let Some(found) = Self::locate(child) {
                            return Some(found);
                        }
                    }
                }
                Some(node)
            }
            TargetKind::NestedChild | TargetKind::VirtualList => Some(node),
            TargetKind::Container => node.children.iter().find_map(Self::locate),
            TargetKind::Plain => None,
        }
    }

    /// Reported vertical offset of the resolved content under `presented`.
    ///
    /// A resolver miss degrades to zero: the child then contributes nothing
    /// to linked-fling decisions.
    pub fn vertical_offset(&mut self, presented: &TargetNode) -> i32 {
        match self.resolve(presented) {
            Some(node) => self.offset_of(node),
            None => 0,
        }
    }

    /// Reported offset of an already-resolved node.
    pub fn offset_of(&self, node: &TargetNode) -> i32 {
        match self.strategies.get(&node.kind) {
            Some(strategy) => strategy(node),
            None => node.scroll_offset,
        }
    }
}
