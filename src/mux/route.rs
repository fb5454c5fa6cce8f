use super::captures::Captures;
use super::node::NodeRef;
use super::{Children, Mux, NodeId, ROOT};

use crate::path;

use smallvec::SmallVec;
use tracing::trace;

type SmallKvBuffer<'a> = SmallVec<[(&'a str, &'a str); 8]>;

impl<T> Mux<T> {
    /// Resolves already split `segments` to a node and its bindings.
    ///
    /// Empty and `.` segments are skipped. A level with a variable matches any
    /// segment; otherwise the segment must equal a literal exactly. There is
    /// no backtracking, a miss at any level returns `None`.
    ///
    /// The returned node may be a junction without a value.
    pub fn route<'a>(&'a self, segments: &[&'a str]) -> Option<(NodeRef<'a, T>, Captures<'a>)> {
        let mut captures = Captures::new();
        let id = self.route_with_buf(segments, &mut captures.buf);
        trace!(?segments, matched = id.is_some(), "mux route");
        Some((NodeRef::new(self, id?), captures))
    }

    /// Splits and cleans a raw request `path`, then resolves it to a value.
    ///
    /// Unlike [`route`](Self::route), a node without a value is not found.
    pub fn find<'a>(&'a self, path: &'a str) -> Option<(&'a T, Captures<'a>)> {
        let parts = path::segments(path);
        let (node, captures) = self.route(&parts)?;
        Some((node.value()?, captures))
    }

    fn route_with_buf<'a>(
        &'a self,
        mut segments: &[&'a str],
        captures: &mut SmallKvBuffer<'a>,
    ) -> Option<NodeId> {
        let mut id = ROOT;
        loop {
            let (&part, rest) = loop {
                match segments.split_first() {
                    Some((&s, rest)) if s.is_empty() || s == "." => segments = rest,
                    Some(next) => break next,
                    None => return Some(id),
                }
            };

            id = match self.get(id).children {
                Children::Variable(var) => {
                    captures.push((&*self.get(var).name, part));
                    var
                }
                Children::Literal(ref map) => *map.find(part)?,
            };
            segments = rest;
        }
    }
}
