//! The node catalog: a registry of childless prototypes cloned by name.

use indexmap::IndexMap;

use sylva_core::{CatalogError, IntRange, Node, NodeKind, Point2};

/// Upper bound on children for the standard composite prototypes.
pub const COMPOSITE_MAX_CHILDREN: i32 = 10;

/// Registry mapping kind name to a prototype node.
///
/// Prototypes are childless by construction — registration rejects anything
/// else — and are never ticked. [`instantiate`](Catalog::instantiate) is the
/// only supported instantiation path from outside the editor.
#[derive(Debug, Default)]
pub struct Catalog {
    prototypes: IndexMap<String, Node>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with the standard composite kinds pre-registered:
    /// `"Sequence"` and `"Fallback"`, each accepting 1 to
    /// [`COMPOSITE_MAX_CHILDREN`] children.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let range = IntRange::new(1, COMPOSITE_MAX_CHILDREN);
        let registered = [
            catalog.register(
                "Sequence",
                Node::new(NodeKind::sequence()).with_child_range(range),
            ),
            catalog.register(
                "Fallback",
                Node::new(NodeKind::fallback()).with_child_range(range),
            ),
        ];
        debug_assert!(registered.iter().all(Result::is_ok));
        catalog
    }

    /// Store `prototype` under `name`.
    ///
    /// Re-registering a name replaces the previous prototype. Fails with
    /// [`CatalogError::PrototypeHasChildren`] if the prototype is not
    /// childless.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        prototype: Node,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if !prototype.children.is_empty() {
            return Err(CatalogError::PrototypeHasChildren { name });
        }
        self.prototypes.insert(name, prototype);
        Ok(())
    }

    /// Clone the prototype registered under `name`, placed at `position`.
    ///
    /// The clone starts detached: no parent, no children, no tick state.
    pub fn instantiate(&self, name: &str, position: Point2) -> Result<Node, CatalogError> {
        let prototype = self
            .prototypes
            .get(name)
            .ok_or_else(|| CatalogError::UnknownKind {
                name: name.to_string(),
            })?;
        debug_assert!(prototype.children.is_empty());

        let mut node = prototype.clone();
        node.position = position;
        node.parent = None;
        node.children.clear();
        node.reset_tick_state();
        Ok(node)
    }

    /// Whether a prototype is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Registered kind names, in registration order.
    pub fn kind_names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }
}
