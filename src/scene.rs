use crate::canvas::Canvas;
use crate::element::{Element, ElementId, ElementType};
use crate::geometry::Point;

/// Ordered element list. Insertion order is paint order: later elements paint
/// over earlier ones, and hit testing walks the list back to front.
///
/// At most one element is selected at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<ElementType>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<ElementType>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: ElementType) {
        self.elements.push(element);
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    /// Removes the element with `id`, keeping the others in order
    pub fn remove(&mut self, id: ElementId) -> Option<ElementType> {
        let index = self.elements.iter().position(|element| element.id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Topmost element whose hit area contains `point`
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|element| element.contains(point))
            .map(|element| element.id())
    }

    pub fn selected(&self) -> Option<&ElementType> {
        self.elements.iter().find(|element| element.is_selected())
    }

    pub fn selected_mut(&mut self) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|element| element.is_selected())
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected().map(|element| element.id())
    }

    /// Selects `id` and deselects everything else. `None` clears the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        for element in &mut self.elements {
            element.set_selected(Some(element.id()) == id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// Paints every element in list order
    pub fn draw(&self, canvas: &mut Canvas) {
        for element in &self.elements {
            element.draw(canvas);
        }
    }
}
