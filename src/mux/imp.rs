use super::endpoint::Endpoint;
use super::error::MuxError;
use super::node::NodeMut;
use super::Mux;

impl<T> Mux<T> {
    /// Registers `value` at `template`.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn add(&mut self, template: &str, value: T) -> NodeMut<'_, T> {
        self.root_mut().add(template, value)
    }

    pub fn try_add(&mut self, template: &str, value: T) -> Result<NodeMut<'_, T>, MuxError> {
        self.root_mut().try_add(template, value)
    }

    /// Creates the segments of `template` without a value.
    pub fn add_empty(&mut self, template: &str) -> NodeMut<'_, T> {
        self.root_mut().add_empty(template)
    }

    pub fn try_add_empty(&mut self, template: &str) -> Result<NodeMut<'_, T>, MuxError> {
        self.root_mut().try_add_empty(template)
    }

    /// Attaches every route of `mux` below `prefix`.
    ///
    /// The node at `prefix` must not have a value or segments yet. It takes
    /// over the root value of `mux`.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn graft(&mut self, prefix: &str, mux: Mux<T>) -> NodeMut<'_, T> {
        self.root_mut().graft(prefix, mux)
    }

    pub fn try_graft(&mut self, prefix: &str, mux: Mux<T>) -> Result<NodeMut<'_, T>, MuxError> {
        self.root_mut().try_graft(prefix, mux)
    }

    pub fn nest(&mut self, prefix: &str, f: impl FnOnce(&mut Mux<T>)) -> &mut Self {
        self.root_mut().nest(prefix, f);
        self
    }

    pub fn try_nest(
        &mut self,
        prefix: &str,
        f: impl FnOnce(&mut Mux<T>),
    ) -> Result<&mut Self, MuxError> {
        let mut sub = Self::new();
        f(&mut sub);
        self.root_mut().try_insert(prefix, Endpoint::Mux(sub))?;
        Ok(self)
    }
}
