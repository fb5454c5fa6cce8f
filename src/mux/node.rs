use super::endpoint::Endpoint;
use super::error::MuxError;
use super::{Children, Mux, NodeId};

use std::fmt;

/// Shared handle to one node of a [`Mux`].
pub struct NodeRef<'a, T> {
    mux: &'a Mux<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(super) fn new(mux: &'a Mux<T>, id: NodeId) -> Self {
        Self { mux, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Segment name; for variables the name without braces. Empty at the root.
    pub fn name(&self) -> &'a str {
        &self.mux.get(self.id).name
    }

    pub fn is_variable(&self) -> bool {
        self.mux.get(self.id).is_variable
    }

    pub fn is_root(&self) -> bool {
        self.mux.get(self.id).parent.is_none()
    }

    /// The value registered at this node, `None` for a junction.
    pub fn value(&self) -> Option<&'a T> {
        self.mux.get(self.id).value.as_ref()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        let parent = self.mux.get(self.id).parent?;
        Some(Self::new(self.mux, parent))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let mux = self.mux;
        let (variable, literals) = match mux.get(self.id).children {
            Children::Variable(var) => (Some(var), None),
            Children::Literal(ref map) => (None, Some(map.iter().map(|(_, &id)| id))),
        };
        variable
            .into_iter()
            .chain(literals.into_iter().flatten())
            .map(move |id| NodeRef::new(mux, id))
    }

    /// Canonical template of this node, joined with `sep`.
    ///
    /// The root formats as `""`, so with `sep = "/"` a child of the root gives
    /// `"/a"` and a variable below it `"/a/{id}"`.
    pub fn path(&self, sep: &str) -> String {
        let mut lineage: Vec<NodeId> = Vec::new();
        let mut cur = self.id;
        while let Some(parent) = self.mux.get(cur).parent {
            lineage.push(cur);
            cur = parent;
        }

        let mut s = String::new();
        for &id in lineage.iter().rev() {
            let node = self.mux.get(id);
            s.push_str(sep);
            if node.is_variable {
                s.push('{');
                s.push_str(&node.name);
                s.push('}');
            } else {
                s.push_str(&node.name);
            }
        }
        s
    }
}

impl<T> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.path("/"))
        }
    }
}

impl<T> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.to_string())
            .finish()
    }
}

/// Exclusive handle to one node of a [`Mux`], used to keep registering
/// templates relative to that node.
///
/// ```
/// use treemux::Mux;
///
/// let mut mux: Mux<u32> = Mux::new();
/// mux.add("a", 2).add("b", 3).add("c", 4);
/// assert_eq!(mux.find("/a/b/c").map(|(v, _)| *v), Some(4));
/// ```
pub struct NodeMut<'a, T> {
    mux: &'a mut Mux<T>,
    id: NodeId,
}

impl<'a, T> NodeMut<'a, T> {
    pub(super) fn new(mux: &'a mut Mux<T>, id: NodeId) -> Self {
        Self { mux, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> NodeRef<'_, T> {
        NodeRef::new(self.mux, self.id)
    }

    pub fn path(&self, sep: &str) -> String {
        self.node().path(sep)
    }

    pub fn add(self, template: &str, value: T) -> NodeMut<'a, T> {
        self.insert_or_panic(template, Endpoint::Data(value))
    }

    pub fn try_add(self, template: &str, value: T) -> Result<NodeMut<'a, T>, MuxError> {
        self.try_insert(template, Endpoint::Data(value))
    }

    pub fn add_empty(self, template: &str) -> NodeMut<'a, T> {
        self.insert_or_panic(template, Endpoint::Empty)
    }

    pub fn try_add_empty(self, template: &str) -> Result<NodeMut<'a, T>, MuxError> {
        self.try_insert(template, Endpoint::Empty)
    }

    pub fn graft(self, prefix: &str, mux: Mux<T>) -> NodeMut<'a, T> {
        self.insert_or_panic(prefix, Endpoint::Mux(mux))
    }

    pub fn try_graft(self, prefix: &str, mux: Mux<T>) -> Result<NodeMut<'a, T>, MuxError> {
        self.try_insert(prefix, Endpoint::Mux(mux))
    }

    pub fn nest(self, prefix: &str, f: impl FnOnce(&mut Mux<T>)) -> NodeMut<'a, T> {
        let mut sub = Mux::new();
        f(&mut sub);
        self.graft(prefix, sub)
    }

    pub fn try_insert(
        self,
        template: &str,
        endpoint: Endpoint<T>,
    ) -> Result<NodeMut<'a, T>, MuxError> {
        let id = self.mux.insert_endpoint(self.id, template, endpoint)?;
        Ok(NodeMut::new(self.mux, id))
    }

    fn insert_or_panic(self, template: &str, endpoint: Endpoint<T>) -> NodeMut<'a, T> {
        match self.try_insert(template, endpoint) {
            Ok(node) => node,
            Err(e) => panic!("{}: template = {:?}", e, template),
        }
    }
}

impl<T> fmt::Debug for NodeMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.node(), f)
    }
}
