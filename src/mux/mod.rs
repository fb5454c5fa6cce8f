mod captures;
mod endpoint;
mod error;
mod imp;
mod insert;
mod name;
mod node;
mod route;

pub use self::captures::{Captures, OwnedCaptures};
pub use self::endpoint::Endpoint;
pub use self::error::MuxError;
pub use self::node::{NodeMut, NodeRef};

use crate::strmap::StrMap;

/// Index of a node inside the arena of one [`Mux`].
///
/// Ids are only meaningful for the mux that produced them. Grafting a mux into
/// another one renumbers the grafted nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

/// A segment tree mapping path templates to values.
///
/// Templates are `/` separated. A segment written as `{name}` is a variable
/// that matches any single segment and captures it under `name`; any other
/// segment is matched literally. A level holds either literal segments or a
/// single variable, never both, so every path resolves along at most one
/// branch.
///
/// ```
/// use treemux::Mux;
///
/// let mut mux: Mux<u32> = Mux::new();
/// mux.add("user/{id}/profile", 1);
///
/// let (value, captures) = mux.find("/user/42/profile").unwrap();
/// assert_eq!(*value, 1);
/// assert_eq!(captures.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Mux<T> {
    nodes: Vec<Node<T>>,
}

#[derive(Debug, Clone)]
struct Node<T> {
    name: Box<str>,
    is_variable: bool,
    value: Option<T>,
    children: Children,
    parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
enum Children {
    Literal(StrMap<NodeId>),
    Variable(NodeId),
}

impl<T> Default for Mux<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mux<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root(None)],
        }
    }

    /// Creates a mux whose root itself resolves to `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            nodes: vec![Node::root(Some(value))],
        }
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, ROOT)
    }

    pub fn root_mut(&mut self) -> NodeMut<'_, T> {
        NodeMut::new(self, ROOT)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        if id.0 < self.nodes.len() {
            Some(NodeRef::new(self, id))
        } else {
            None
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, T>> {
        if id.0 < self.nodes.len() {
            Some(NodeMut::new(self, id))
        } else {
            None
        }
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has neither segments nor a root value.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].value.is_none()
    }

    #[inline]
    fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }
}

impl<T> Node<T> {
    fn root(value: Option<T>) -> Self {
        Self {
            name: "".into(),
            is_variable: false,
            value,
            children: Children::Literal(StrMap::new()),
            parent: None,
        }
    }
}

impl Children {
    fn is_empty(&self) -> bool {
        match self {
            Self::Literal(map) => map.is_empty(),
            Self::Variable(_) => false,
        }
    }
}
