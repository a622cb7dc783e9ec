//! Headless element tree
//!
//! A minimal arena-backed stand-in for the browser DOM. Plugins create
//! elements, tag them with `part` attributes for external theming, set inline
//! styles, and attach/detach them under host surfaces. Geometry is resolved
//! by [`Dom::bounding_rect`] using a small absolute-positioning model:
//!
//! - Detached elements measure as [`Rect::ZERO`]
//! - Elements with a fixed rect (host surfaces) use it verbatim
//! - Otherwise `left`/`right`/`width`/`top`/`height` resolve against the
//!   parent rect (`%` or `px`), `margin-top` shifts the element down, and
//!   missing dimensions fall back to the intrinsic size, then the parent size
//!
//! Elements are never freed; detaching only unlinks them from their parent.

use std::collections::BTreeMap;

use crate::geometry::{Length, Rect, Size};

/// Index of an element in the [`Dom`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Text measurement used for intrinsic sizing of text-only elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average advance per character in pixels
    pub char_width: f64,
    /// Height of a single text line in pixels
    pub line_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    content_editable: bool,
    intrinsic: Option<Size>,
    fixed_rect: Option<Rect>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            content_editable: false,
            intrinsic: None,
            fixed_rect: None,
        }
    }
}

/// Arena of elements rooted at a document element
#[derive(Debug, Clone)]
pub struct Dom {
    elements: Vec<Element>,
    root: ElementId,
    focused: Option<ElementId>,
    metrics: TextMetrics,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a document containing only the root element
    pub fn new() -> Self {
        Self::with_metrics(TextMetrics::default())
    }

    /// Create a document with custom text metrics
    pub fn with_metrics(metrics: TextMetrics) -> Self {
        Self {
            elements: vec![Element::new("body")],
            root: ElementId(0),
            focused: None,
            metrics,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    fn get(&self, el: ElementId) -> &Element {
        &self.elements[el.0]
    }

    fn get_mut(&mut self, el: ElementId) -> &mut Element {
        &mut self.elements[el.0]
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag));
        id
    }

    /// Create a detached element holding text
    pub fn create_text_element(&mut self, tag: &str, text: &str) -> ElementId {
        let id = self.create_element(tag);
        self.set_text(id, text);
        id
    }

    pub fn tag(&self, el: ElementId) -> &str {
        &self.get(el).tag
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes, styles, text
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.get_mut(el)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.get(el).attributes.get(name).map(String::as_str)
    }

    pub fn remove_attribute(&mut self, el: ElementId, name: &str) {
        self.get_mut(el).attributes.remove(name);
    }

    /// Whether the element's `part` attribute contains `token`
    pub fn has_part(&self, el: ElementId, token: &str) -> bool {
        self.attribute(el, "part")
            .is_some_and(|part| part.split_whitespace().any(|t| t == token))
    }

    pub fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.get_mut(el)
            .style
            .insert(property.to_string(), value.to_string());
    }

    /// Set several style properties at once
    pub fn set_styles(&mut self, el: ElementId, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            self.set_style(el, property, value);
        }
    }

    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.get(el).style.get(property).map(String::as_str)
    }

    pub fn remove_style(&mut self, el: ElementId, property: &str) {
        self.get_mut(el).style.remove(property);
    }

    pub fn set_text(&mut self, el: ElementId, text: &str) {
        self.get_mut(el).text = Some(text.to_string());
    }

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.get(el).text.as_deref()
    }

    pub fn set_content_editable(&mut self, el: ElementId, editable: bool) {
        self.get_mut(el).content_editable = editable;
        if editable {
            self.set_attribute(el, "contenteditable", "true");
        } else {
            self.remove_attribute(el, "contenteditable");
        }
    }

    pub fn is_content_editable(&self, el: ElementId) -> bool {
        self.get(el).content_editable
    }

    /// Override the intrinsic size used when no explicit width/height is styled
    pub fn set_intrinsic_size(&mut self, el: ElementId, size: Size) {
        self.get_mut(el).intrinsic = Some(size);
    }

    /// Pin the element to a fixed rect (host surfaces)
    pub fn set_fixed_rect(&mut self, el: ElementId, rect: Rect) {
        self.get_mut(el).fixed_rect = Some(rect);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.get_mut(parent).children.push(child);
        self.get_mut(child).parent = Some(parent);
    }

    /// Unlink the element from its parent; a no-op when already detached
    pub fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.get_mut(el).parent.take() {
            self.get_mut(parent).children.retain(|&c| c != el);
        }
        if self.focused.is_some_and(|f| f == el || self.contains(el, f)) {
            self.focused = None;
        }
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.get(el).parent
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.get(el).children
    }

    /// The element itself followed by each ancestor up to the root
    pub fn ancestors(&self, el: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(Some(el), move |&e| self.parent(e))
    }

    /// Whether `descendant` is `ancestor` or lies beneath it
    pub fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        self.ancestors(descendant).any(|e| e == ancestor)
    }

    /// Whether the element is reachable from the document root
    pub fn is_connected(&self, el: ElementId) -> bool {
        self.contains(self.root, el)
    }

    /// First descendant (depth-first) whose `part` contains `token`
    pub fn query_part(&self, el: ElementId, token: &str) -> Option<ElementId> {
        for &child in self.children(el) {
            if self.has_part(child, token) {
                return Some(child);
            }
            if let Some(found) = self.query_part(child, token) {
                return Some(found);
            }
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────────

    /// Focus an element; only connected elements can take focus
    pub fn focus(&mut self, el: ElementId) -> bool {
        if !self.is_connected(el) {
            return false;
        }
        self.focused = Some(el);
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    fn style_length(&self, el: ElementId, property: &str) -> Option<Length> {
        self.style(el, property).and_then(Length::parse)
    }

    fn intrinsic_size(&self, el: ElementId) -> Option<Size> {
        let element = self.get(el);
        if let Some(size) = element.intrinsic {
            return Some(size);
        }
        element.text.as_ref().map(|text| {
            Size::new(
                text.chars().count() as f64 * self.metrics.char_width,
                self.metrics.line_height,
            )
        })
    }

    /// Resolve the element's rectangle in content coordinates
    pub fn bounding_rect(&self, el: ElementId) -> Rect {
        if !self.is_connected(el) {
            return Rect::ZERO;
        }
        self.resolve_rect(el)
    }

    fn resolve_rect(&self, el: ElementId) -> Rect {
        if let Some(rect) = self.get(el).fixed_rect {
            return rect;
        }
        let parent = match self.parent(el) {
            Some(p) => self.resolve_rect(p),
            None => return Rect::ZERO,
        };
        let intrinsic = self.intrinsic_size(el);

        let left = self.style_length(el, "left").map(|l| l.resolve(parent.width));
        let right = self.style_length(el, "right").map(|l| l.resolve(parent.width));
        let styled_width = self.style_length(el, "width").map(|l| l.resolve(parent.width));
        let (x, width) = match (left, right, styled_width) {
            (Some(l), _, Some(w)) => (l, w),
            (Some(l), Some(r), None) => (l, (parent.width - l - r).max(0.0)),
            (None, Some(r), Some(w)) => (parent.width - r - w, w),
            (l, _, None) => (
                l.unwrap_or(0.0),
                intrinsic.map_or(parent.width, |s| s.width),
            ),
            (None, None, Some(w)) => (0.0, w),
        };

        let top = self.style_length(el, "top").map_or(0.0, |l| l.resolve(parent.height));
        let margin_top = self
            .style_length(el, "margin-top")
            .map_or(0.0, |l| l.resolve(parent.width));
        let height = self
            .style_length(el, "height")
            .map(|l| l.resolve(parent.height))
            .or_else(|| intrinsic.map(|s| s.height))
            .unwrap_or(parent.height);

        Rect::new(parent.x + x, parent.y + top + margin_top, width, height)
    }

    /// Rendered width of the element (zero when detached)
    pub fn client_width(&self, el: ElementId) -> f64 {
        self.bounding_rect(el).width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(dom: &mut Dom, width: f64, height: f64) -> ElementId {
        let wrapper = dom.create_element("div");
        dom.set_fixed_rect(wrapper, Rect::new(0.0, 0.0, width, height));
        let root = dom.root();
        dom.append_child(root, wrapper);
        wrapper
    }

    #[test]
    fn test_append_reparents() {
        let mut dom = Dom::new();
        let a = surface(&mut dom, 100.0, 10.0);
        let b = surface(&mut dom, 100.0, 10.0);
        let child = dom.create_element("div");

        dom.append_child(a, child);
        assert_eq!(dom.parent(child), Some(a));

        dom.append_child(b, child);
        assert_eq!(dom.parent(child), Some(b));
        assert!(dom.children(a).is_empty(), "Old parent must lose the child");
        assert_eq!(dom.children(b), &[child]);
    }

    #[test]
    fn test_detached_measures_zero() {
        let mut dom = Dom::new();
        let wrapper = surface(&mut dom, 1000.0, 100.0);
        let el = dom.create_element("div");
        dom.set_styles(el, &[("left", "10%"), ("width", "5%")]);
        assert_eq!(dom.bounding_rect(el), Rect::ZERO);

        dom.append_child(wrapper, el);
        assert_eq!(dom.bounding_rect(el), Rect::new(100.0, 0.0, 50.0, 100.0));

        dom.detach(el);
        assert_eq!(dom.bounding_rect(el), Rect::ZERO);
        assert!(!dom.is_connected(el));
    }

    #[test]
    fn test_left_right_percentages() {
        let mut dom = Dom::new();
        let wrapper = surface(&mut dom, 1000.0, 100.0);
        let el = dom.create_element("div");
        dom.set_styles(el, &[("left", "20%"), ("right", "60%"), ("top", "50%"), ("height", "50%")]);
        dom.append_child(wrapper, el);
        assert_eq!(dom.bounding_rect(el), Rect::new(200.0, 50.0, 200.0, 50.0));
    }

    #[test]
    fn test_right_anchored_fixed_width() {
        let mut dom = Dom::new();
        let wrapper = surface(&mut dom, 1000.0, 100.0);
        let el = dom.create_element("div");
        dom.set_styles(el, &[("right", "0"), ("width", "6px")]);
        dom.append_child(wrapper, el);
        assert_eq!(dom.bounding_rect(el).x, 994.0);
    }

    #[test]
    fn test_text_intrinsic_size_and_margin() {
        let mut dom = Dom::new();
        let wrapper = surface(&mut dom, 1000.0, 100.0);
        let label = dom.create_text_element("div", "hello");
        dom.set_style(label, "margin-top", "16px");
        dom.append_child(wrapper, label);
        let rect = dom.bounding_rect(label);
        assert_eq!(rect.width, 35.0);
        assert_eq!(rect.height, 16.0);
        assert_eq!(rect.y, 16.0);
    }

    #[test]
    fn test_query_part() {
        let mut dom = Dom::new();
        let parent = dom.create_element("div");
        let left = dom.create_element("div");
        dom.set_attribute(left, "part", "region-handle region-handle-left");
        dom.append_child(parent, left);

        assert_eq!(dom.query_part(parent, "region-handle-left"), Some(left));
        assert_eq!(dom.query_part(parent, "region-handle-right"), None);
        assert!(!dom.has_part(left, "region"));
    }

    #[test]
    fn test_focus_cleared_on_detach() {
        let mut dom = Dom::new();
        let wrapper = surface(&mut dom, 100.0, 10.0);
        let el = dom.create_element("div");
        assert!(!dom.focus(el), "Detached elements cannot take focus");

        dom.append_child(wrapper, el);
        assert!(dom.focus(el));
        dom.detach(el);
        assert_eq!(dom.focused(), None);
    }
}
