/// A route table conflict found while building a [`Mux`](super::Mux).
///
/// These are configuration mistakes. The panicking insertion methods abort
/// with this error's message; the `try_*` methods hand it back instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MuxError {
    #[error("invalid segment name {name:?}")]
    InvalidName { name: String },

    #[error("duplicate value at {path:?}")]
    Duplicate { path: String },

    #[error("{path:?} cannot add variable {{{name}}} because it already has literal segments")]
    VariableConflict { path: String, name: String },

    #[error("{path:?} cannot add {segment:?} because it expects variable {{{variable}}}")]
    ExpectVariable {
        path: String,
        segment: String,
        variable: String,
    },

    #[error("{path:?} binds variable {{{name}}} more than once")]
    DuplicateVariable { path: String, name: String },

    #[error("{path:?} cannot graft a sub-mux along with an existing value or segments")]
    GraftConflict { path: String },
}
