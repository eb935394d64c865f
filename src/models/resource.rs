//! Resource model.
//!
//! Resources are the entities that perform operations: machines and
//! personnel. Each resource has a kind, an optional display name, and
//! optional capability tags. Only machines incur switchover penalties.

use serde::{Deserialize, Serialize};

/// Registry-assigned resource identifier.
pub type ResourceId = u32;

/// A resource that operations are scheduled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier. `None` until the registry assigns one.
    pub id: Option<ResourceId>,
    /// Resource classification.
    pub kind: ResourceKind,
    /// Human-readable name.
    pub name: Option<String>,
    /// Capability tags (e.g., "filling").
    pub tags: Vec<String>,
}

/// Resource classification.
///
/// Determines switchover semantics: machines pay job and material
/// switch penalties, people never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Processing equipment (e.g., injection-molding machine).
    Machine,
    /// Human resource (e.g., packer, inspector).
    Person,
}

impl Resource {
    /// Creates a resource of the given kind without an id.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            id: None,
            kind,
            name: None,
            tags: Vec::new(),
        }
    }

    /// Creates a machine.
    pub fn machine() -> Self {
        Self::new(ResourceKind::Machine)
    }

    /// Creates a person.
    pub fn person() -> Self {
        Self::new(ResourceKind::Person)
    }

    /// Sets an explicit id, honored as-is by the registry.
    pub fn with_id(mut self, id: ResourceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a capability tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether this resource is a machine.
    #[inline]
    pub fn is_machine(&self) -> bool {
        self.kind == ResourceKind::Machine
    }
}
