//! Contract violations reported by the ECS.
//!
//! Every failure in this crate is a programmer error: the host broke a precondition of the world
//! (used an id it never allocated, forgot to register a type, and so on). The `try_` operations on
//! [`World`](crate::ecs::World) return these as values so they can be inspected; the plain
//! operations log them and panic.
//!
//! Errors fall into two classes, see [`ErrorKind`]. Exhaustion means a fixed ceiling was hit and a
//! rebuild with larger limits would help. Invalid argument means the call itself was wrong.

use std::fmt;

use crate::ecs::entity::Entity;

/// Result alias for fallible ECS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A build-time capacity ceiling was reached.
    Exhausted,
    /// The caller passed an argument that violates a precondition.
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Exhausted => write!(f, "capacity exhausted"),
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

/// A violated ECS contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Every entity id is currently assigned.
    EntityPoolExhausted {
        /// The pool size.
        capacity: usize,
    },

    /// The entity id lies outside `[0, capacity)`.
    EntityOutOfRange {
        /// The offending entity.
        entity: Entity,
        /// The pool size.
        capacity: usize,
    },

    /// The entity id is in range but not currently allocated.
    EntityNotAlive {
        /// The offending entity.
        entity: Entity,
    },

    /// The component type has already been given a slot.
    ComponentAlreadyRegistered {
        /// Name of the component type.
        component: &'static str,
    },

    /// Every component slot is taken.
    ComponentLimitReached {
        /// Name of the component type that did not fit.
        component: &'static str,
        /// The number of available slots.
        capacity: usize,
    },

    /// The component type was never registered.
    ComponentNotRegistered {
        /// Name of the component type.
        component: &'static str,
    },

    /// The entity already holds a value of this component type.
    ComponentAlreadyPresent {
        /// The entity.
        entity: Entity,
        /// Name of the component type.
        component: &'static str,
    },

    /// The entity holds no value of this component type.
    ComponentMissing {
        /// The entity.
        entity: Entity,
        /// Name of the component type.
        component: &'static str,
    },
}

impl Error {
    /// Classify this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EntityPoolExhausted { .. } | Error::ComponentLimitReached { .. } => {
                ErrorKind::Exhausted
            }
            Error::EntityOutOfRange { .. }
            | Error::EntityNotAlive { .. }
            | Error::ComponentAlreadyRegistered { .. }
            | Error::ComponentNotRegistered { .. }
            | Error::ComponentAlreadyPresent { .. }
            | Error::ComponentMissing { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Returns true if a capacity ceiling caused this error.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.kind() == ErrorKind::Exhausted
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EntityPoolExhausted { capacity } => {
                write!(f, "entity pool exhausted ({capacity} entities live)")
            }
            Error::EntityOutOfRange { entity, capacity } => {
                write!(f, "entity {entity} out of range (capacity {capacity})")
            }
            Error::EntityNotAlive { entity } => write!(f, "entity {entity} is not alive"),
            Error::ComponentAlreadyRegistered { component } => {
                write!(f, "component `{component}` already registered")
            }
            Error::ComponentLimitReached {
                component,
                capacity,
            } => write!(
                f,
                "cannot register component `{component}`: all {capacity} component slots in use"
            ),
            Error::ComponentNotRegistered { component } => {
                write!(f, "component `{component}` not registered")
            }
            Error::ComponentAlreadyPresent { entity, component } => {
                write!(f, "entity {entity} already has component `{component}`")
            }
            Error::ComponentMissing { entity, component } => {
                write!(f, "entity {entity} has no component `{component}`")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Unwrap a contract check, logging and panicking on violation.
///
/// Used by the non-`try_` world operations, which treat every violation as fatal.
#[inline]
#[track_caller]
pub(crate) fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            log::error!("ecs contract violated ({}): {err}", err.kind());
            panic!("{err}");
        }
    }
}
