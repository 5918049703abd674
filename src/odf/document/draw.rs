//! Frames and images.

use super::{Document, Selector, style_predicate};
use crate::common::Result;
use crate::odf::constants::PART_CONTENT;
use crate::odf::query::Predicates;
use crate::odf::xml::{Element, Position};

impl Document {
    /// Frames, optionally of one `draw:style-name`.
    pub fn get_frame_list(&self, style: Option<&str>, context: Option<&Element>) -> Result<Vec<Element>> {
        self.element_list("draw:frame", style_predicate("draw:style-name", style), context, PART_CONTENT)
    }

    /// One frame, by position or by `draw:name`.
    pub fn get_frame<'a>(&self, selector: impl Into<Selector<'a>>, context: Option<&Element>) -> Result<Option<Element>> {
        let selector: Selector<'a> = selector.into();
        let (position, predicates) = selector.split("draw:name");
        self.element("draw:frame", position, predicates, context, PART_CONTENT)
    }

    /// Insert a frame into `context` (a paragraph, or the frame's anchor).
    pub fn insert_frame(&self, element: Element, context: &Element, position: Position) -> Result<()> {
        context.insert_element(element, position)
    }

    /// The image of a frame, the frame given by position or by `draw:name`.
    pub fn get_image<'a>(&self, selector: impl Into<Selector<'a>>, context: Option<&Element>) -> Result<Option<Element>> {
        let Some(frame) = self.get_frame(selector, context)? else {
            return Ok(None);
        };
        self.element("draw:image", None, Predicates::new(), Some(&frame), PART_CONTENT)
    }

    /// Insert an image into a frame.
    pub fn insert_image(&self, element: Element, frame: &Element, position: Position) -> Result<()> {
        frame.insert_element(element, position)
    }
}
