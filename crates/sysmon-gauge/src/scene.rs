//! Retained drawing primitives.
//!
//! A [`Scene`] is built once and then mutated in place through the
//! [`ItemId`]s handed out at creation. Items are drawn in insertion order.

use sysmon_core::theme::Rgb;

use crate::geometry::BBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcStyle {
    /// Wedge closed through the ellipse center; may be filled.
    Pieslice,
    /// Open stroke along the ellipse.
    Arc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcItem {
    pub bbox: BBox,
    pub start: f64,
    pub extent: f64,
    pub style: ArcStyle,
    pub fill: Option<Rgb>,
    pub outline: Rgb,
    pub width: f64,
}

/// Which point of the text's box sits at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    North,
    NorthEast,
    NorthWest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
    pub font_size: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Arc(ArcItem),
    Text(TextItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    background: Rgb,
    items: Vec<Item>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            items: Vec::new(),
        }
    }

    pub fn add_arc(&mut self, arc: ArcItem) -> ItemId {
        self.items.push(Item::Arc(arc));
        ItemId(self.items.len() - 1)
    }

    pub fn add_text(&mut self, text: TextItem) -> ItemId {
        self.items.push(Item::Text(text));
        ItemId(self.items.len() - 1)
    }

    pub fn arc(&self, id: ItemId) -> Option<&ArcItem> {
        match self.items.get(id.0)? {
            Item::Arc(a) => Some(a),
            Item::Text(_) => None,
        }
    }

    pub fn arc_mut(&mut self, id: ItemId) -> Option<&mut ArcItem> {
        match self.items.get_mut(id.0)? {
            Item::Arc(a) => Some(a),
            Item::Text(_) => None,
        }
    }

    pub fn text(&self, id: ItemId) -> Option<&TextItem> {
        match self.items.get(id.0)? {
            Item::Text(t) => Some(t),
            Item::Arc(_) => None,
        }
    }

    pub fn text_mut(&mut self, id: ItemId) -> Option<&mut TextItem> {
        match self.items.get_mut(id.0)? {
            Item::Text(t) => Some(t),
            Item::Arc(_) => None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|i| match i {
            Item::Text(t) => Some(t),
            Item::Arc(_) => None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn set_background(&mut self, background: Rgb) {
        self.background = background;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> TextItem {
        TextItem {
            x: 0.0,
            y: 0.0,
            text: text.into(),
            anchor: Anchor::Center,
            font_size: 10.0,
            color: Rgb::BLACK,
        }
    }

    fn wedge() -> ArcItem {
        ArcItem {
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            start: 0.0,
            extent: 90.0,
            style: ArcStyle::Pieslice,
            fill: None,
            outline: Rgb::BLACK,
            width: 1.0,
        }
    }

    #[test]
    fn ids_address_their_items() {
        let mut scene = Scene::new(10, 10, Rgb::WHITE);
        let t = scene.add_text(label("hi"));
        let a = scene.add_arc(wedge());
        assert_eq!(scene.text(t).unwrap().text, "hi");
        assert_eq!(scene.arc(a).unwrap().extent, 90.0);
        assert!(scene.arc(t).is_none());
        assert!(scene.text(a).is_none());
    }

    #[test]
    fn mutation_in_place_keeps_item_count() {
        let mut scene = Scene::new(10, 10, Rgb::WHITE);
        let t = scene.add_text(label("a"));
        scene.text_mut(t).unwrap().text = "b".into();
        assert_eq!(scene.items().len(), 1);
        assert_eq!(scene.texts().next().unwrap().text, "b");
    }
}
