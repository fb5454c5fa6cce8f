use super::endpoint::Endpoint;
use super::error::MuxError;
use super::name::Token;
use super::{Children, Mux, Node, NodeId, NodeRef, ROOT};

use crate::path;
use crate::strmap::StrMap;

use smallvec::SmallVec;
use tracing::debug;

type Tokens<'a> = SmallVec<[Token<'a>; 8]>;

impl<T> Mux<T> {
    /// Registers `template` below node `at`, returning the terminal node.
    ///
    /// Nothing is modified unless the whole insertion succeeds.
    pub(super) fn insert_endpoint(
        &mut self,
        at: NodeId,
        template: &str,
        endpoint: Endpoint<T>,
    ) -> Result<NodeId, MuxError> {
        debug!(
            at = %self.display_path(at),
            template,
            graft = endpoint.is_mux(),
            "mux add"
        );

        let tokens = parse_template(template)?;
        self.check_variables(at, &tokens, &endpoint)?;
        self.check(at, &tokens, &endpoint)?;

        let mut id = at;
        for token in &tokens {
            id = self.child_or_insert(id, token);
        }

        match endpoint {
            Endpoint::Empty => {}
            Endpoint::Data(value) => self.get_mut(id).value = Some(value),
            Endpoint::Mux(sub) => self.graft_at(id, sub),
        }
        Ok(id)
    }

    /// Rejects a variable name that is already bound on the way from the root
    /// to any node the insertion would create or graft.
    fn check_variables(
        &self,
        at: NodeId,
        tokens: &[Token<'_>],
        endpoint: &Endpoint<T>,
    ) -> Result<(), MuxError> {
        let mut bound: SmallVec<[&str; 8]> = SmallVec::new();
        let mut cur = Some(at);
        while let Some(id) = cur {
            let node = self.get(id);
            if node.is_variable {
                bound.push(&*node.name);
            }
            cur = node.parent;
        }

        let mut prefix = NodeRef::new(self, at).path("/");
        for token in tokens {
            prefix.push('/');
            prefix.push_str(&token.to_string());
            if token.is_variable {
                if bound.contains(&token.name) {
                    return Err(MuxError::DuplicateVariable {
                        path: prefix,
                        name: token.name.to_owned(),
                    });
                }
                bound.push(token.name);
            }
        }

        if let Endpoint::Mux(sub) = endpoint {
            for (i, node) in sub.nodes.iter().enumerate() {
                if node.is_variable && bound.contains(&&*node.name) {
                    return Err(MuxError::DuplicateVariable {
                        path: prefix + &NodeRef::new(sub, NodeId(i)).path("/"),
                        name: node.name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Walks the existing part of the tree and reports the first conflict the
    /// insertion would cause.
    fn check(&self, at: NodeId, tokens: &[Token<'_>], endpoint: &Endpoint<T>) -> Result<(), MuxError> {
        let mut id = at;
        for token in tokens {
            let node = self.get(id);
            let next = match node.children {
                // a variable level takes no further children, not even the
                // same variable again
                Children::Variable(var) => {
                    return Err(MuxError::ExpectVariable {
                        path: self.display_path(id),
                        segment: token.to_string(),
                        variable: self.get(var).name.to_string(),
                    });
                }
                Children::Literal(ref map) => {
                    if token.is_variable {
                        if !map.is_empty() {
                            return Err(MuxError::VariableConflict {
                                path: self.display_path(id),
                                name: token.name.to_owned(),
                            });
                        }
                        None
                    } else {
                        map.find(token.name).copied()
                    }
                }
            };
            match next {
                Some(next) => id = next,
                // the rest of the path is new, so it cannot conflict
                None => return Ok(()),
            }
        }

        let node = self.get(id);
        match endpoint {
            Endpoint::Empty => Ok(()),
            Endpoint::Data(_) if node.value.is_some() => Err(MuxError::Duplicate {
                path: self.display_path(id),
            }),
            Endpoint::Data(_) => Ok(()),
            Endpoint::Mux(sub) => {
                if sub.get(ROOT).value.is_some() && node.value.is_some() {
                    return Err(MuxError::Duplicate {
                        path: self.display_path(id),
                    });
                }
                if node.value.is_some() || !node.children.is_empty() {
                    return Err(MuxError::GraftConflict {
                        path: self.display_path(id),
                    });
                }
                Ok(())
            }
        }
    }

    fn child_or_insert(&mut self, parent: NodeId, token: &Token<'_>) -> NodeId {
        let next = NodeId(self.nodes.len());
        let node = self.get_mut(parent);
        match node.children {
            Children::Variable(var) => var,
            Children::Literal(ref mut map) => {
                if token.is_variable {
                    node.children = Children::Variable(next);
                } else {
                    let child = *map.find_mut_with(token.name, || next);
                    if child != next {
                        return child;
                    }
                }
                debug!(parent = %self.display_path(parent), segment = %token, "mux new segment");
                self.nodes.push(Node {
                    name: token.name.into(),
                    is_variable: token.is_variable,
                    value: None,
                    children: Children::Literal(StrMap::new()),
                    parent: Some(parent),
                });
                next
            }
        }
    }

    /// Moves every node of `sub` into this arena below `target`.
    ///
    /// The sub-mux root merges into `target`: its value lands on `target` and
    /// its children are re-parented to `target`.
    fn graft_at(&mut self, target: NodeId, sub: Mux<T>) {
        let offset = self.nodes.len();
        let remap = |id: NodeId| {
            if id == ROOT {
                target
            } else {
                NodeId(offset + id.0 - 1)
            }
        };
        let remap_children = |children: Children| match children {
            Children::Variable(var) => Children::Variable(remap(var)),
            Children::Literal(map) => {
                let mut out = StrMap::new();
                for (key, id) in map {
                    out.insert(&key, remap(id));
                }
                Children::Literal(out)
            }
        };

        let mut nodes = sub.nodes.into_iter();
        let root = match nodes.next() {
            Some(root) => root,
            None => return,
        };

        self.nodes.reserve(nodes.len());
        for node in nodes {
            self.nodes.push(Node {
                name: node.name,
                is_variable: node.is_variable,
                value: node.value,
                children: remap_children(node.children),
                parent: node.parent.map(remap),
            });
        }

        let target_node = self.get_mut(target);
        target_node.value = root.value;
        target_node.children = remap_children(root.children);
    }

    pub(super) fn display_path(&self, id: NodeId) -> String {
        NodeRef::new(self, id).to_string()
    }
}

/// Splits and validates a template.
///
/// Separators and `.` segments are cleaned like a request path, but a `..`
/// that would climb above the node the template is added to is an error.
fn parse_template(template: &str) -> Result<Tokens<'_>, MuxError> {
    let mut tokens = Tokens::new();
    for raw in template.split(path::SLASH) {
        match raw {
            "" | "." => {}
            ".." => {
                if tokens.pop().is_none() {
                    return Err(MuxError::InvalidName {
                        name: raw.to_owned(),
                    });
                }
            }
            _ => tokens.push(Token::parse(raw).ok_or_else(|| MuxError::InvalidName {
                name: raw.to_owned(),
            })?),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::super::{Children, Mux, MuxError};

    fn assert_invariants<T>(mux: &Mux<T>) {
        for (i, node) in mux.nodes.iter().enumerate() {
            let children: Vec<_> = match node.children {
                Children::Variable(var) => {
                    assert!(mux.nodes[var.0].is_variable);
                    vec![var]
                }
                Children::Literal(ref map) => map
                    .iter()
                    .map(|(key, &id)| {
                        assert!(!mux.nodes[id.0].is_variable);
                        assert_eq!(key, &*mux.nodes[id.0].name);
                        id
                    })
                    .collect(),
            };
            for child in children {
                assert_eq!(mux.nodes[child.0].parent.map(|p| p.0), Some(i));
            }
        }
    }

    #[test]
    fn shared_prefix() {
        let mut mux: Mux<u32> = Mux::new();
        mux.add("a/b/c", 1);
        mux.add("a/b/d", 2);
        mux.add("/a//b", 3);
        // root, a, b, c, d
        assert_eq!(mux.len(), 5);
        assert_invariants(&mux);
    }

    #[test]
    fn failed_insert_leaves_tree_untouched() {
        let mut mux: Mux<u32> = Mux::new();
        mux.add("b/literal", 1);
        let before = mux.len();

        let err = mux.try_add("b/{id}/deeper", 2).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            MuxError::VariableConflict {
                path: "/b".into(),
                name: "id".into()
            }
        );
        assert_eq!(mux.len(), before);

        let err = mux.try_add("c/ok/No-", 2).map(|_| ()).unwrap_err();
        assert_eq!(err, MuxError::InvalidName { name: "No-".into() });
        assert_eq!(mux.len(), before);
    }

    #[test]
    fn graft_reparents() {
        let mut sub: Mux<u32> = Mux::with_value(10);
        sub.add("z", 11);
        sub.add("x/{id}", 12);

        let mut mux: Mux<u32> = Mux::new();
        mux.add("a", 1);
        mux.graft("g", sub);
        assert_invariants(&mux);

        let (node, captures) = mux.route(&["g", "x", "7"]).unwrap();
        assert_eq!(node.value(), Some(&12));
        assert_eq!(node.path("/"), "/g/x/{id}");
        assert_eq!(captures.get("id"), Some("7"));
    }

    #[test]
    fn template_parent_segments() {
        let mut mux: Mux<u32> = Mux::new();
        mux.add("a/b/../c", 1);
        assert_eq!(mux.find("/a/c").map(|(v, _)| *v), Some(1));
        assert!(mux.find("/a/b").is_none());

        let before = mux.len();
        for template in ["../../a", "..", "/x/../../y"] {
            let err = mux.try_add(template, 2).map(|_| ()).unwrap_err();
            assert_eq!(err, MuxError::InvalidName { name: "..".into() });
        }
        assert_eq!(mux.len(), before);

        // relative templates cannot climb above their node either
        let a = mux.root_mut().try_add_empty("a").unwrap().id();
        assert!(mux.node_mut(a).unwrap().try_add("../b", 3).is_err());
    }
}
