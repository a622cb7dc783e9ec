//! A single draggable/resizable region
//!
//! A region owns its element subtree (body, optional label, optional resize
//! handles) and an event channel. It never touches the collection it lives
//! in: everything it wants the outside world to know goes out as a
//! [`RegionEvent`], both to its own subscribers and to an outbox the region
//! plugin drains after each operation.
//!
//! Geometry changes go through [`Bounds::shifted`], which either returns a
//! fully valid candidate or nothing. A rejected update leaves the region
//! untouched and emits nothing.

use wavemark_core::geometry::{clamp_time, Length};
use wavemark_core::{Dom, ElementId, Emitter, SubscriptionId};

use super::config::RegionsConfig;
use super::events::{RegionEvent, RegionHandle, RegionSnapshot};
use super::params::{RegionContent, RegionOptions, RegionParams, Side};

/// Start/end pair of a region in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub start: f64,
    pub end: f64,
}

/// Constraints a candidate [`Bounds`] must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub total_duration: f64,
    pub min_length: f64,
    pub max_length: f64,
}

impl Limits {
    /// `0 <= start <= end <= total` and `min <= end - start <= max`
    pub fn admits(&self, bounds: &Bounds) -> bool {
        let length = bounds.length();
        bounds.start >= 0.0
            && bounds.end <= self.total_duration
            && bounds.start <= bounds.end
            && length >= self.min_length
            && length <= self.max_length
    }
}

impl Bounds {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Zero-width bounds denote a marker
    pub fn is_marker(&self) -> bool {
        self.start == self.end
    }

    /// Shift by `delta` seconds: both bounds for a move, one for a resize
    ///
    /// Returns `None` when the result would break any limit; there is no
    /// partial application and no clamping to the nearest valid position.
    pub fn shifted(&self, delta: f64, side: Option<Side>, limits: &Limits) -> Option<Bounds> {
        let start = match side {
            None | Some(Side::Start) => self.start + delta,
            Some(Side::End) => self.start,
        };
        let end = match side {
            None | Some(Side::End) => self.end + delta,
            Some(Side::Start) => self.end,
        };
        let candidate = Bounds { start, end };
        limits.admits(&candidate).then_some(candidate)
    }
}

/// Vertical lane `(top %, height %)` for a channel-restricted region
fn channel_lane(channel_idx: Option<usize>, channel_count: usize) -> (f64, f64) {
    match channel_idx {
        Some(idx) if idx < channel_count => {
            let height = 100.0 / channel_count as f64;
            (height * idx as f64, height)
        }
        _ => (0.0, 100.0),
    }
}

/// A timed interval overlay; a zero-width region is a marker
#[derive(Debug)]
pub struct Region {
    handle: RegionHandle,
    id: String,
    bounds: Bounds,
    total_duration: f64,
    channel_count: usize,
    drag: bool,
    resize: bool,
    color: String,
    min_length: f64,
    max_length: f64,
    channel_idx: Option<usize>,
    content_editable: bool,
    handle_width: f64,
    element: ElementId,
    content: Option<ElementId>,
    resize_handles: Option<[ElementId; 2]>,
    removed: bool,
    emitter: Emitter<RegionEvent>,
    outbox: Vec<RegionEvent>,
}

impl Region {
    /// Build a region and its (detached) element subtree
    ///
    /// Bounds are clamped into `[0, total_duration]`; while the duration is
    /// unknown (zero) only the lower bound is enforced.
    pub(crate) fn new(
        dom: &mut Dom,
        handle: RegionHandle,
        params: RegionParams,
        total_duration: f64,
        channel_count: Option<usize>,
        config: &RegionsConfig,
    ) -> Self {
        let start = clamp_time(params.start, total_duration);
        let mut end = clamp_time(params.end.unwrap_or(params.start), total_duration);
        if end < start {
            log::warn!(
                "Region: end {:.3}s before start {:.3}s, collapsing to a marker",
                end,
                start
            );
            end = start;
        }

        let id = params
            .id
            .unwrap_or_else(|| format!("region-{}", uuid::Uuid::new_v4().simple()));
        let element = dom.create_element("div");

        let mut region = Self {
            handle,
            id,
            bounds: Bounds { start, end },
            total_duration,
            channel_count: channel_count.unwrap_or(0),
            drag: params.drag.unwrap_or(true),
            resize: params.resize.unwrap_or(true),
            color: params.color.unwrap_or_else(|| config.default_color.clone()),
            min_length: params.min_length.unwrap_or(0.0),
            max_length: params.max_length.unwrap_or(f64::INFINITY),
            channel_idx: params.channel_idx,
            content_editable: params.content_editable.unwrap_or(false),
            handle_width: config.handle_width,
            element,
            content: None,
            resize_handles: None,
            removed: false,
            emitter: Emitter::new(),
            outbox: Vec::new(),
        };

        region.init_element(dom);
        region.set_content(dom, params.content);
        region.set_part(dom);
        region.render_position(dom);
        region
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle(&self) -> RegionHandle {
        self.handle
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> f64 {
        self.bounds.start
    }

    pub fn end(&self) -> f64 {
        self.bounds.end
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_marker(&self) -> bool {
        self.bounds.is_marker()
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn drag(&self) -> bool {
        self.drag
    }

    pub fn resize(&self) -> bool {
        self.resize
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn min_length(&self) -> f64 {
        self.min_length
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    pub fn channel_idx(&self) -> Option<usize> {
        self.channel_idx
    }

    pub fn content_editable(&self) -> bool {
        self.content_editable
    }

    /// Root element of the region
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Label element, if any
    pub fn content(&self) -> Option<ElementId> {
        self.content
    }

    /// `(left, right)` resize handles, present only for resizable non-markers
    pub fn resize_handles(&self) -> Option<(ElementId, ElementId)> {
        self.resize_handles.map(|[l, r]| (l, r))
    }

    /// Which side a resize handle element controls
    pub fn handle_side(&self, el: ElementId) -> Option<Side> {
        match self.resize_handles {
            Some([l, _]) if l == el => Some(Side::Start),
            Some([_, r]) if r == el => Some(Side::End),
            _ => None,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            handle: self.handle,
            id: self.id.clone(),
            start: self.bounds.start,
            end: self.bounds.end,
        }
    }

    fn limits(&self) -> Limits {
        Limits {
            total_duration: self.total_duration,
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on(&mut self, listener: impl FnMut(&RegionEvent) + 'static) -> SubscriptionId {
        self.emitter.on(listener)
    }

    pub fn once(&mut self, listener: impl FnMut(&RegionEvent) + 'static) -> SubscriptionId {
        self.emitter.once(listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    fn emit(&mut self, event: RegionEvent) {
        self.emitter.emit(&event);
        self.outbox.push(event);
    }

    /// Events emitted since the last call, for the owning plugin
    pub(crate) fn take_outbox(&mut self) -> Vec<RegionEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn init_element(&mut self, dom: &mut Dom) {
        let (top, height) = channel_lane(self.channel_idx, self.channel_count);
        let top = Length::percent(top);
        let height = Length::percent(height);
        dom.set_styles(
            self.element,
            &[
                ("position", "absolute"),
                ("top", top.as_str()),
                ("height", height.as_str()),
                ("border-radius", "2px"),
                ("box-sizing", "border-box"),
                ("transition", "background-color 0.2s ease"),
                ("pointer-events", "all"),
                ("cursor", if self.drag { "grab" } else { "default" }),
            ],
        );
        self.sync_shape(dom);
    }

    /// Marker/region styling and handle presence follow the current bounds
    fn sync_shape(&mut self, dom: &mut Dom) {
        if self.is_marker() {
            let border = format!("2px solid {}", self.color);
            dom.set_style(self.element, "background-color", "none");
            dom.set_style(self.element, "border-left", &border);
        } else {
            dom.set_style(self.element, "background-color", &self.color);
            dom.set_style(self.element, "border-left", "none");
        }

        if self.resize && !self.is_marker() {
            self.add_resize_handles(dom);
        } else {
            self.remove_resize_handles(dom);
        }
    }

    fn set_part(&self, dom: &mut Dom) {
        let kind = if self.is_marker() { "marker" } else { "region" };
        dom.set_attribute(self.element, "part", &format!("{} {}", kind, self.id));
    }

    fn render_position(&self, dom: &mut Dom) {
        if self.total_duration <= 0.0 {
            return;
        }
        let left = self.bounds.start * 100.0 / self.total_duration;
        let right = (self.total_duration - self.bounds.end) * 100.0 / self.total_duration;
        dom.set_style(self.element, "left", &Length::percent(left));
        dom.set_style(self.element, "right", &Length::percent(right));
    }

    fn add_resize_handles(&mut self, dom: &mut Dom) {
        if self.resize_handles.is_some() {
            return;
        }
        let element = self.element;
        let width = Length::px(self.handle_width);
        let make = |dom: &mut Dom, side: Side| {
            let suffix = match side {
                Side::Start => "left",
                Side::End => "right",
            };
            let handle = dom.create_element("div");
            dom.set_attribute(handle, "part", &format!("region-handle region-handle-{}", suffix));
            dom.set_styles(
                handle,
                &[
                    ("position", "absolute"),
                    ("z-index", "2"),
                    ("width", width.as_str()),
                    ("height", "100%"),
                    ("top", "0"),
                    ("cursor", "ew-resize"),
                    ("word-break", "keep-all"),
                ],
            );
            match side {
                Side::Start => dom.set_styles(
                    handle,
                    &[
                        ("left", "0"),
                        ("border-left", "2px solid rgba(0, 0, 0, 0.5)"),
                        ("border-radius", "2px 0 0 2px"),
                    ],
                ),
                Side::End => dom.set_styles(
                    handle,
                    &[
                        ("right", "0"),
                        ("border-right", "2px solid rgba(0, 0, 0, 0.5)"),
                        ("border-radius", "0 2px 2px 0"),
                    ],
                ),
            }
            dom.append_child(element, handle);
            handle
        };
        let left = make(dom, Side::Start);
        let right = make(dom, Side::End);
        self.resize_handles = Some([left, right]);
    }

    fn remove_resize_handles(&mut self, dom: &mut Dom) {
        if let Some(handles) = self.resize_handles.take() {
            for handle in handles {
                dom.detach(handle);
            }
        }
    }

    fn toggle_cursor(&self, dom: &mut Dom, grabbing: bool) {
        if !self.drag {
            return;
        }
        dom.set_style(self.element, "cursor", if grabbing { "grabbing" } else { "grab" });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the label; `None` removes it
    pub fn set_content(&mut self, dom: &mut Dom, content: Option<RegionContent>) -> bool {
        if self.removed {
            return false;
        }
        if let Some(old) = self.content.take() {
            dom.detach(old);
        }
        let Some(content) = content else {
            return true;
        };

        let el = match content {
            RegionContent::Text(text) => {
                let el = dom.create_text_element("div", &text);
                let padding = if self.is_marker() { "0.2em 0.2em" } else { "0.2em 0.4em" };
                dom.set_styles(el, &[("padding", padding), ("display", "inline-block")]);
                el
            }
            RegionContent::Element(el) => el,
        };
        if self.content_editable {
            dom.set_content_editable(el, true);
        }
        dom.set_attribute(el, "part", "region-content");
        dom.append_child(self.element, el);
        self.content = Some(el);
        true
    }

    /// Apply any subset of options; returns false once the region is removed
    pub fn set_options(&mut self, dom: &mut Dom, options: RegionOptions) -> bool {
        if self.removed {
            return false;
        }

        if let Some(color) = options.color {
            self.color = color;
            self.sync_shape(dom);
        }

        if let Some(drag) = options.drag {
            self.drag = drag;
            dom.set_style(self.element, "cursor", if drag { "grab" } else { "default" });
        }

        if options.start.is_some() || options.end.is_some() {
            let was_marker = self.is_marker();
            let start = clamp_time(options.start.unwrap_or(self.bounds.start), self.total_duration);
            let end = clamp_time(
                options
                    .end
                    .unwrap_or(if was_marker { start } else { self.bounds.end }),
                self.total_duration,
            );
            if end < start {
                log::warn!(
                    "Region {}: ignoring bounds update {:.3}..{:.3} (end before start)",
                    self.id,
                    start,
                    end
                );
            } else {
                self.bounds = Bounds { start, end };
                self.render_position(dom);
                self.set_part(dom);
                self.sync_shape(dom);
            }
        }

        if let Some(content) = options.content {
            self.set_content(dom, Some(content));
        }

        if let Some(id) = options.id {
            self.id = id;
            self.set_part(dom);
        }

        if let Some(resize) = options.resize {
            if resize != self.resize {
                self.resize = resize;
                self.sync_shape(dom);
            }
        }

        true
    }

    /// Ask the plugin to play this region from its start
    pub fn play(&mut self) -> bool {
        if self.removed {
            return false;
        }
        self.emit(RegionEvent::Play);
        true
    }

    /// Emit `Remove`, drop every subscriber and detach the element
    ///
    /// Terminal: every later operation is a no-op.
    pub fn remove(&mut self, dom: &mut Dom) -> bool {
        if self.removed {
            return false;
        }
        self.emit(RegionEvent::Remove);
        self.emitter.clear();
        dom.detach(self.element);
        self.removed = true;
        log::debug!("Region {} removed", self.id);
        true
    }

    /// Correct the duration context once the host knows it
    pub(crate) fn set_total_duration(&mut self, dom: &mut Dom, total_duration: f64) {
        self.total_duration = total_duration;
        let start = clamp_time(self.bounds.start, total_duration);
        let end = clamp_time(self.bounds.end, total_duration).max(start);
        self.bounds = Bounds { start, end };
        self.render_position(dom);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interaction
    // ─────────────────────────────────────────────────────────────────────────

    /// Shift by a pixel delta measured against the parent's rendered width
    ///
    /// `side == None` moves both bounds; `Some(side)` resizes one. Returns
    /// true and emits `Update` only if the candidate bounds are valid.
    pub(crate) fn apply_delta(&mut self, dom: &mut Dom, dx: f64, side: Option<Side>) -> bool {
        if self.removed {
            return false;
        }
        let Some(parent) = dom.parent(self.element) else {
            return false;
        };
        let width = dom.client_width(parent);
        if width <= 0.0 {
            return false;
        }
        let delta = dx * self.total_duration / width;
        let Some(next) = self.bounds.shifted(delta, side, &self.limits()) else {
            log::trace!("Region {}: rejected update by {:.3}s", self.id, delta);
            return false;
        };
        self.bounds = next;
        self.render_position(dom);
        self.emit(RegionEvent::Update { side });
        true
    }

    pub(crate) fn drag_started(&self, dom: &mut Dom) {
        self.toggle_cursor(dom, true);
    }

    pub(crate) fn drag_move(&mut self, dom: &mut Dom, dx: f64) -> bool {
        self.drag && self.apply_delta(dom, dx, None)
    }

    pub(crate) fn drag_ended(&mut self, dom: &mut Dom) {
        self.toggle_cursor(dom, false);
        if self.drag && !self.removed {
            self.emit(RegionEvent::UpdateEnd);
        }
    }

    pub(crate) fn resize_move(&mut self, dom: &mut Dom, dx: f64, side: Side) -> bool {
        self.resize && self.apply_delta(dom, dx, Some(side))
    }

    pub(crate) fn resize_ended(&mut self) {
        if self.resize && !self.removed {
            self.emit(RegionEvent::UpdateEnd);
        }
    }

    pub(crate) fn clicked(&mut self) {
        if !self.removed {
            self.emit(RegionEvent::Click);
        }
    }

    pub(crate) fn double_clicked(&mut self) {
        if !self.removed {
            self.emit(RegionEvent::DoubleClick);
        }
    }

    pub(crate) fn pointer_over(&mut self) {
        if !self.removed {
            self.emit(RegionEvent::Over);
        }
    }

    pub(crate) fn pointer_left(&mut self) {
        if !self.removed {
            self.emit(RegionEvent::Leave);
        }
    }

    /// Whether a click on `target` should start editing the label
    pub(crate) fn is_editable_content(&self, target: ElementId) -> bool {
        self.content_editable && self.content == Some(target)
    }

    /// Label click: focus it for editing and report a click on the region
    pub(crate) fn content_clicked(&mut self, dom: &mut Dom) {
        if self.removed {
            return;
        }
        if let Some(content) = self.content {
            dom.focus(content);
        }
        self.emit(RegionEvent::Click);
    }

    /// Label lost focus: the edit session is over
    pub(crate) fn content_blurred(&mut self) {
        if !self.removed {
            self.emit(RegionEvent::UpdateEnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wavemark_core::Rect;

    fn setup() -> (Dom, ElementId) {
        let mut dom = Dom::new();
        let container = dom.create_element("div");
        dom.set_fixed_rect(container, Rect::new(0.0, 0.0, 1000.0, 100.0));
        let root = dom.root();
        dom.append_child(root, container);
        (dom, container)
    }

    fn region(dom: &mut Dom, container: ElementId, params: RegionParams) -> Region {
        let region = Region::new(
            dom,
            RegionHandle(1),
            params,
            10.0,
            Some(2),
            &RegionsConfig::default(),
        );
        dom.append_child(container, region.element());
        region
    }

    fn recorder(region: &mut Region) -> Rc<RefCell<Vec<RegionEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        region.on(move |e| sink.borrow_mut().push(e.clone()));
        seen
    }

    #[test]
    fn test_construct_clamps_and_positions() {
        let (mut dom, container) = setup();
        let r = region(&mut dom, container, RegionParams::new(-5.0, 20.0).with_id("all"));
        assert_eq!((r.start(), r.end()), (0.0, 10.0));
        assert_eq!(dom.attribute(r.element(), "part"), Some("region all"));
        assert_eq!(dom.bounding_rect(r.element()).width, 1000.0);

        let r = region(&mut dom, container, RegionParams::new(2.0, 4.0));
        assert_eq!(dom.style(r.element(), "left"), Some("20%"));
        assert_eq!(dom.style(r.element(), "right"), Some("60%"));
        assert!(r.id().starts_with("region-"));
    }

    #[test]
    fn test_non_finite_bounds_map_to_zero() {
        let (mut dom, container) = setup();
        let r = region(&mut dom, container, RegionParams::new(f64::NAN, f64::NAN));
        assert_eq!((r.start(), r.end()), (0.0, 0.0));
        assert_eq!(dom.style(r.element(), "left"), Some("0%"));
        assert_eq!(dom.style(r.element(), "right"), Some("100%"));

        let r = region(&mut dom, container, RegionParams::new(2.0, f64::NAN));
        assert_eq!((r.start(), r.end()), (2.0, 2.0));
    }

    #[test]
    fn test_marker_has_no_handles() {
        let (mut dom, container) = setup();
        let r = region(&mut dom, container, RegionParams::marker(5.0).with_resize(true).with_id("m"));
        assert!(r.is_marker());
        assert_eq!(r.resize_handles(), None);
        assert_eq!(dom.attribute(r.element(), "part"), Some("marker m"));
        assert_eq!(dom.style(r.element(), "background-color"), Some("none"));
    }

    #[test]
    fn test_move_and_resize_updates() {
        let (mut dom, container) = setup();
        let mut r = region(&mut dom, container, RegionParams::new(2.0, 4.0));
        let seen = recorder(&mut r);

        // 1000px over 10s: 100px per second
        assert!(r.apply_delta(&mut dom, 100.0, None));
        assert_eq!((r.start(), r.end()), (3.0, 5.0));

        assert!(r.apply_delta(&mut dom, 50.0, Some(Side::End)));
        assert_eq!((r.start(), r.end()), (3.0, 5.5));

        assert_eq!(
            *seen.borrow(),
            vec![
                RegionEvent::Update { side: None },
                RegionEvent::Update { side: Some(Side::End) },
            ]
        );
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let (mut dom, container) = setup();
        let mut r = region(
            &mut dom,
            container,
            RegionParams::new(2.0, 4.0).with_length_limits(1.5, 3.0),
        );
        let seen = recorder(&mut r);

        // Past the end of the track
        assert!(!r.apply_delta(&mut dom, 700.0, None));
        // Below min length
        assert!(!r.apply_delta(&mut dom, -100.0, Some(Side::End)));
        // Above max length
        assert!(!r.apply_delta(&mut dom, -200.0, Some(Side::Start)));
        // Start past end
        assert!(!r.apply_delta(&mut dom, 300.0, Some(Side::Start)));

        assert_eq!((r.start(), r.end()), (2.0, 4.0));
        assert!(seen.borrow().is_empty(), "Rejected updates emit nothing");
    }

    #[test]
    fn test_detached_region_ignores_updates() {
        let (mut dom, container) = setup();
        let mut r = region(&mut dom, container, RegionParams::new(2.0, 4.0));
        dom.detach(r.element());
        assert!(!r.apply_delta(&mut dom, 100.0, None));
        assert_eq!(r.start(), 2.0);
    }

    #[test]
    fn test_drag_flag_gates_moves() {
        let (mut dom, container) = setup();
        let mut r = region(&mut dom, container, RegionParams::new(2.0, 4.0).with_drag(false));
        assert!(!r.drag_move(&mut dom, 100.0));
        assert_eq!(dom.style(r.element(), "cursor"), Some("default"));

        r.drag_ended(&mut dom);
        assert!(r.take_outbox().is_empty(), "No update-end without drag");
    }

    #[test]
    fn test_toggle_resize_handles() {
        let (mut dom, container) = setup();
        let mut r = region(
            &mut dom,
            container,
            RegionParams::new(2.0, 4.0).with_content("label"),
        );
        let content = r.content().unwrap();
        let rect_before = dom.bounding_rect(r.element());
        assert_eq!(dom.children(r.element()).len(), 3);

        r.set_options(&mut dom, RegionOptions { resize: Some(false), ..Default::default() });
        assert_eq!(r.resize_handles(), None);
        assert_eq!(dom.children(r.element()), &[content]);
        assert_eq!(dom.query_part(r.element(), "region-handle-left"), None);
        assert_eq!(dom.bounding_rect(r.element()), rect_before);

        r.set_options(&mut dom, RegionOptions { resize: Some(true), ..Default::default() });
        let (left, right) = r.resize_handles().unwrap();
        assert_eq!(dom.query_part(r.element(), "region-handle-left"), Some(left));
        assert_eq!(dom.query_part(r.element(), "region-handle-right"), Some(right));
        assert_eq!(r.content(), Some(content));
        assert_eq!(dom.bounding_rect(right).x, rect_before.right() - 6.0);
    }

    #[test]
    fn test_set_options_bounds_and_id() {
        let (mut dom, container) = setup();
        let mut r = region(&mut dom, container, RegionParams::marker(1.0).with_id("m"));

        // A marker's end follows its start
        r.set_options(&mut dom, RegionOptions { start: Some(3.0), ..Default::default() });
        assert_eq!((r.start(), r.end()), (3.0, 3.0));

        r.set_options(
            &mut dom,
            RegionOptions { end: Some(6.0), id: Some("r".into()), ..Default::default() },
        );
        assert_eq!((r.start(), r.end()), (3.0, 6.0));
        assert_eq!(dom.attribute(r.element(), "part"), Some("region r"));
        assert!(r.resize_handles().is_some(), "Non-marker regains handles");

        // End before start is ignored
        r.set_options(&mut dom, RegionOptions { end: Some(1.0), ..Default::default() });
        assert_eq!((r.start(), r.end()), (3.0, 6.0));
    }

    #[test]
    fn test_remove_is_terminal() {
        let (mut dom, container) = setup();
        let mut r = region(&mut dom, container, RegionParams::new(2.0, 4.0));
        let seen = recorder(&mut r);

        assert!(r.remove(&mut dom));
        assert!(!r.remove(&mut dom));
        assert!(!r.play());
        assert!(!r.set_options(&mut dom, RegionOptions { drag: Some(false), ..Default::default() }));

        assert_eq!(*seen.borrow(), vec![RegionEvent::Remove]);
        assert_eq!(dom.parent(r.element()), None);
        assert!(r.is_removed());
    }

    #[test]
    fn test_channel_lane() {
        let (mut dom, container) = setup();
        let r = region(&mut dom, container, RegionParams::new(2.0, 4.0).with_channel(1));
        assert_eq!(dom.style(r.element(), "top"), Some("50%"));
        assert_eq!(dom.style(r.element(), "height"), Some("50%"));

        // Out-of-range lanes span every channel
        let r = region(&mut dom, container, RegionParams::new(2.0, 4.0).with_channel(5));
        assert_eq!(dom.style(r.element(), "height"), Some("100%"));
    }

    #[test]
    fn test_editable_content() {
        let (mut dom, container) = setup();
        let mut r = region(
            &mut dom,
            container,
            RegionParams::new(2.0, 4.0)
                .with_content("edit me")
                .with_content_editable(true),
        );
        let content = r.content().unwrap();
        assert!(dom.is_content_editable(content));
        assert!(r.is_editable_content(content));

        r.content_clicked(&mut dom);
        assert_eq!(dom.focused(), Some(content));
        r.content_blurred();
        assert_eq!(r.take_outbox(), vec![RegionEvent::Click, RegionEvent::UpdateEnd]);
    }

    #[test]
    fn test_deferred_duration_correction() {
        let mut dom = Dom::new();
        let mut r = Region::new(
            &mut dom,
            RegionHandle(7),
            RegionParams::new(1.0, 2.0),
            0.0,
            None,
            &RegionsConfig::default(),
        );
        assert_eq!((r.start(), r.end()), (1.0, 2.0));
        assert_eq!(dom.style(r.element(), "left"), None);

        r.set_total_duration(&mut dom, 10.0);
        assert_eq!(r.total_duration(), 10.0);
        assert_eq!(dom.style(r.element(), "left"), Some("10%"));
        assert_eq!(dom.style(r.element(), "right"), Some("80%"));
    }
}
