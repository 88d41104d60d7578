//! Ordered, id-unique collection of layout elements.

use crate::element::{Element, ElementId};
use crate::placement::Placement;
use crate::viewport::Viewport;

/// All elements of a layout, in insertion order.
///
/// Ids are unique: [`ElementRegistry::add`] always mints a fresh id and
/// [`ElementRegistry::insert`] refuses a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementRegistry {
    elements: Vec<Element>,
}

impl ElementRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unplaced element with a fresh id and append it.
    pub fn add(&mut self, description: impl Into<String>) -> ElementId {
        let mut element = Element::new(description);
        while self.contains(&element.id) {
            element.id = ElementId::new();
        }
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Append an existing element.
    ///
    /// Returns the element back if its id is already taken.
    ///
    /// # Errors
    ///
    /// Returns `Err(element)` when an element with the same id exists.
    pub fn insert(&mut self, element: Element) -> Result<(), Element> {
        if self.contains(&element.id) {
            return Err(element);
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove an element. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Store the trimmed description. Returns `false` if the id is unknown.
    ///
    /// An empty result is stored as-is; rejecting empty descriptions is the
    /// caller's job.
    pub fn update_description(&mut self, id: &ElementId, description: &str) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.description = description.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Get an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Elements placed on a viewport, with their placement, in order.
    pub fn placed_on(&self, viewport: Viewport) -> impl Iterator<Item = (&Element, Placement)> {
        self.elements
            .iter()
            .filter_map(move |e| e.placement(viewport).map(|p| (e, p)))
    }

    /// Replace every element's placement on `viewport` with `f(placement)`.
    ///
    /// Unplaced elements are skipped. Returns how many placements were
    /// cleared by `f`.
    pub fn repair_placements(
        &mut self,
        viewport: Viewport,
        mut f: impl FnMut(Placement) -> Option<Placement>,
    ) -> usize {
        let mut cleared = 0;
        for element in &mut self.elements {
            let slot = &mut element.placements[viewport];
            if let Some(current) = *slot {
                *slot = f(current);
                if slot.is_none() {
                    tracing::trace!(
                        "Cleared {viewport} placement of {} during grid repair",
                        element.id
                    );
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a ElementRegistry {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
