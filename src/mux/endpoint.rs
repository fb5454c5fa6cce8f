use super::Mux;

/// What an insertion attaches at the end of a template.
#[derive(Debug)]
pub enum Endpoint<T> {
    /// Only create the segments; the node stays a valueless junction.
    Empty,
    Data(T),
    /// Graft a whole sub-mux at the node.
    Mux(Mux<T>),
}

impl<T> From<T> for Endpoint<T> {
    fn from(x: T) -> Self {
        Self::Data(x)
    }
}

impl<T> From<Mux<T>> for Endpoint<T> {
    fn from(x: Mux<T>) -> Self {
        Self::Mux(x)
    }
}

impl<T> Endpoint<T> {
    #[inline]
    pub(super) fn is_mux(&self) -> bool {
        match self {
            Self::Mux(_) => true,
            Self::Empty | Self::Data(_) => false,
        }
    }
}
