//! Errors raised by tree mutation, attribute coercion, and serialization.
//!
//! Every failure is synchronous and surfaces to the caller unchanged. Nodes
//! are identified by their show form (see [`DomTree::describe`](crate::DomTree::describe)).

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type DomResult<T> = Result<T, DomError>;

/// Failure categories of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A child-mutation method was called on a node that can never have
    /// children (Text, Comment, `RawText`, `DocumentType`).
    #[error("illegal invocation: {method} on {node}")]
    IllegalInvocation {
        /// Show form of the leaf node.
        node: String,
        /// The operation that was attempted.
        method: &'static str,
    },

    /// A reference node passed to `insert_before` / `replace_child` is not a
    /// child of the target.
    #[error("{child} is not a child of {parent}")]
    MissingChild {
        /// Show form of the parent that was searched.
        parent: String,
        /// Show form of the node that was not found.
        child: String,
    },

    /// An element without a local name reached the serializer.
    #[error("cannot serialize an element without a local name")]
    MissingLocalName,

    /// A void element was asked to serialize children.
    #[error("void element <{tag}> cannot have children")]
    VoidElementChildren {
        /// The void element's tag.
        tag: String,
    },

    /// A value could not be rendered to the string an attribute, text
    /// payload, style, or dataset slot requires.
    #[error("cannot convert {found} to a string")]
    TypeConversion {
        /// Description of the rejected value.
        found: String,
    },

    /// A typed property slot received a value of the wrong shape.
    #[error("invalid value for property '{name}': expected {expected}, found {found}")]
    InvalidProperty {
        /// The property (attribute) name.
        name: String,
        /// The accepted shape.
        expected: &'static str,
        /// Description of the rejected value.
        found: String,
    },

    /// An element's local name is frozen once assigned.
    #[error("local name is already assigned ({current})")]
    LocalNameAlreadyAssigned {
        /// The name the element already carries.
        current: String,
    },
}
