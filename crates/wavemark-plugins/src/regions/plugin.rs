//! Region collection manager
//!
//! Owns the overlay container and every persisted region. Regions report
//! through their outboxes; after each operation the manager drains them and
//! applies the collection-level reactions:
//!
//! ```text
//! Update(None)  ──► keep region in view ──► region-update
//! Update(side)  ──────────────────────────► region-update
//! UpdateEnd     ──► re-stack labels     ──► region-updated
//! Play          ──► seek + play
//! Click / DoubleClick ────────────────────► region-clicked / region-double-clicked
//! Remove        ──► drop + cancel tasks ──► region-removed
//! ```
//!
//! Regions created before the host knows its duration wait in a pending
//! list until `Ready`; a region being drawn by drag-selection lives in its
//! own slot until the gesture ends. Neither is a collection member, and
//! their events are discarded.

use std::collections::HashSet;

use wavemark_core::geometry::px_to_time;
use wavemark_core::{
    Dom, DragEvent, DragTracker, ElementId, Emitter, HostEvent, InputEvent, Length, Plugin,
    PluginError, PluginResult, PointerButton, SubscriptionId, TaskQueue, WaveformHost,
};

use super::config::RegionsConfig;
use super::events::{RegionEvent, RegionHandle, RegionsEvent};
use super::layout;
use super::params::{RegionOptions, RegionParams, Side};
use super::region::Region;
use super::tracking::PlaybackTracker;

const PLUGIN_NAME: &str = "regions";

/// Settle-then-measure work for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionTask {
    /// First attach/detach decision; afterwards the region follows scroll
    Virtualize(RegionHandle),
    /// Recompute the label's stacking margin
    AvoidOverlap(RegionHandle),
}

impl RegionTask {
    fn handle(&self) -> RegionHandle {
        match self {
            RegionTask::Virtualize(h) | RegionTask::AvoidOverlap(h) => *h,
        }
    }
}

/// Token returned by [`RegionsPlugin::enable_drag_selection`]
///
/// Pass it back to [`RegionsPlugin::disarm_drag_selection`] to stop drawing
/// new regions. An inert token (nothing was armed) disarms nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection(Option<u64>);

impl DragSelection {
    /// Whether this token refers to an armed gesture
    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }
}

#[derive(Debug)]
struct SelectionArm {
    token: u64,
    params: RegionParams,
    threshold: f64,
}

/// What element an input event landed on
#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Handle(RegionHandle, Side),
    Body(RegionHandle),
    Wrapper,
}

/// Active pointer gesture
#[derive(Debug)]
enum Gesture {
    Move {
        handle: RegionHandle,
        tracker: DragTracker,
    },
    Resize {
        handle: RegionHandle,
        side: Side,
        tracker: DragTracker,
    },
    /// Drag-to-create; `anchor_x` is set once the threshold is crossed
    Select {
        params: RegionParams,
        tracker: DragTracker,
        anchor_x: Option<f64>,
    },
}

/// Region overlay plugin
#[derive(Debug)]
pub struct RegionsPlugin {
    config: RegionsConfig,
    wrapper: Option<ElementId>,
    container: Option<ElementId>,
    /// Collection members, in creation order
    regions: Vec<Region>,
    /// Built before the duration was known; persisted on `Ready`
    pending: Vec<Region>,
    /// Transient region of an in-progress drag-selection
    creating: Option<Region>,
    selection: Option<SelectionArm>,
    gesture: Option<Gesture>,
    /// Regions whose visibility follows scroll
    scroll_tracked: HashSet<RegionHandle>,
    tracker: PlaybackTracker,
    tasks: TaskQueue<RegionTask>,
    emitter: Emitter<RegionsEvent>,
    next_handle: u64,
    next_selection: u64,
    /// The next click ends a drag and must not reach the regions
    suppress_click: bool,
}

impl Default for RegionsPlugin {
    fn default() -> Self {
        Self::new(RegionsConfig::default())
    }
}

impl RegionsPlugin {
    pub fn new(config: RegionsConfig) -> Self {
        Self {
            tracker: PlaybackTracker::new(config.marker_window),
            config,
            wrapper: None,
            container: None,
            regions: Vec::new(),
            pending: Vec::new(),
            creating: None,
            selection: None,
            gesture: None,
            scroll_tracked: HashSet::new(),
            tasks: TaskQueue::new(),
            emitter: Emitter::new(),
            next_handle: 0,
            next_selection: 0,
            suppress_click: false,
        }
    }

    pub fn config(&self) -> &RegionsConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.container.is_some()
    }

    /// The overlay element every region attaches to
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collection access
    // ─────────────────────────────────────────────────────────────────────────

    /// Persisted regions, in creation order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions waiting for the host's duration
    pub fn pending_regions(&self) -> &[Region] {
        &self.pending
    }

    /// Look up a region by handle, persisted or still pending
    pub fn region(&self, handle: RegionHandle) -> Option<&Region> {
        self.regions
            .iter()
            .chain(self.pending.iter())
            .find(|r| r.handle() == handle)
    }

    pub fn region_by_id(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id() == id)
    }

    /// Regions containing the playback cursor as of the last time update
    pub fn active_regions(&self) -> &[RegionHandle] {
        self.tracker.active()
    }

    fn region_mut(&mut self, handle: RegionHandle) -> Option<&mut Region> {
        self.regions
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|r| r.handle() == handle)
    }

    fn member(&self, handle: RegionHandle) -> Option<&Region> {
        self.regions.iter().find(|r| r.handle() == handle)
    }

    /// Run `f` against a region, then process whatever it emitted
    pub fn with_region<R>(
        &mut self,
        host: &mut dyn WaveformHost,
        handle: RegionHandle,
        f: impl FnOnce(&mut Region, &mut Dom) -> R,
    ) -> Option<R> {
        let region = self.region_mut(handle)?;
        let result = f(region, host.dom_mut());
        self.flush(host);
        Some(result)
    }

    pub fn set_region_options(
        &mut self,
        host: &mut dyn WaveformHost,
        handle: RegionHandle,
        options: RegionOptions,
    ) -> bool {
        self.with_region(host, handle, |r, dom| r.set_options(dom, options))
            .unwrap_or(false)
    }

    pub fn remove_region(&mut self, host: &mut dyn WaveformHost, handle: RegionHandle) -> bool {
        self.with_region(host, handle, |r, dom| r.remove(dom))
            .unwrap_or(false)
    }

    pub fn play_region(&mut self, host: &mut dyn WaveformHost, handle: RegionHandle) -> bool {
        self.with_region(host, handle, |r, _| r.play())
            .unwrap_or(false)
    }

    /// Subscribe to one region's own events
    pub fn subscribe_region(
        &mut self,
        handle: RegionHandle,
        listener: impl FnMut(&RegionEvent) + 'static,
    ) -> Option<SubscriptionId> {
        self.region_mut(handle).map(|r| r.on(listener))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plugin events
    // ─────────────────────────────────────────────────────────────────────────

    pub fn on(&mut self, listener: impl FnMut(&RegionsEvent) + 'static) -> SubscriptionId {
        self.emitter.on(listener)
    }

    pub fn once(&mut self, listener: impl FnMut(&RegionsEvent) + 'static) -> SubscriptionId {
        self.emitter.once(listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    fn emit(&mut self, event: RegionsEvent) {
        log::trace!("Regions: {} {}", event.name(), event.region().id);
        self.emitter.emit(&event);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    fn next_handle(&mut self) -> RegionHandle {
        let handle = RegionHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Create a region
    ///
    /// With a known duration the region joins the collection immediately.
    /// Otherwise it waits for the host's `Ready` signal, which corrects its
    /// duration context and persists it. The handle is valid either way.
    pub fn add_region(
        &mut self,
        host: &mut dyn WaveformHost,
        params: RegionParams,
    ) -> PluginResult<RegionHandle> {
        if !self.is_initialized() {
            return Err(PluginError::NotInitialized {
                plugin: PLUGIN_NAME,
            });
        }

        let handle = self.next_handle();
        let duration = host.duration();
        let channels = host.channel_count();
        let region = Region::new(host.dom_mut(), handle, params, duration, channels, &self.config);
        self.emit(RegionsEvent::Initialized(region.snapshot()));

        if duration > 0.0 {
            self.persist(region);
        } else {
            log::debug!("Regions: deferring {} until the duration is known", region.id());
            self.pending.push(region);
        }
        Ok(handle)
    }

    /// Make a region a collection member and schedule its layout passes
    fn persist(&mut self, mut region: Region) {
        region.take_outbox();
        let handle = region.handle();
        let snapshot = region.snapshot();
        self.regions.push(region);
        self.tasks
            .schedule(self.config.virtualize_delay_ms, RegionTask::Virtualize(handle));
        self.tasks
            .schedule(self.config.overlap_delay_ms, RegionTask::AvoidOverlap(handle));
        self.emit(RegionsEvent::Created(snapshot));
    }

    /// Remove every persisted region
    ///
    /// Regions still waiting for the duration are left alone.
    pub fn clear_regions(&mut self, host: &mut dyn WaveformHost) {
        for region in self.regions.iter_mut() {
            region.remove(host.dom_mut());
        }
        self.flush(host);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drag selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Arm drag-to-create on the host's wrapper
    ///
    /// `params` supplies everything but the bounds of the drawn regions.
    /// Arming again replaces the previous arm. Without an initialized plugin
    /// or a wrapper surface this returns an inert token.
    pub fn enable_drag_selection(
        &mut self,
        host: &dyn WaveformHost,
        params: RegionParams,
        threshold: Option<f64>,
    ) -> DragSelection {
        if !self.is_initialized() || host.wrapper().is_none() {
            return DragSelection(None);
        }
        let token = self.next_selection;
        self.next_selection += 1;
        self.selection = Some(SelectionArm {
            token,
            params,
            threshold: threshold.unwrap_or(self.config.selection_threshold),
        });
        DragSelection(Some(token))
    }

    /// Stop drawing new regions; returns false for a stale or inert token
    pub fn disarm_drag_selection(&mut self, selection: DragSelection) -> bool {
        match (&self.selection, selection.0) {
            (Some(arm), Some(token)) if arm.token == token => {
                self.selection = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_drag_selection_armed(&self) -> bool {
        self.selection.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Drain region outboxes and apply the collection-level reactions
    fn flush(&mut self, host: &mut dyn WaveformHost) {
        for region in self.pending.iter_mut().chain(self.creating.iter_mut()) {
            region.take_outbox();
        }
        self.pending.retain(|r| !r.is_removed());

        let batch: Vec<(RegionHandle, RegionEvent)> = self
            .regions
            .iter_mut()
            .flat_map(|r| {
                let handle = r.handle();
                r.take_outbox().into_iter().map(move |e| (handle, e))
            })
            .collect();

        for (handle, event) in batch {
            self.react(host, handle, event);
        }
    }

    fn react(&mut self, host: &mut dyn WaveformHost, handle: RegionHandle, event: RegionEvent) {
        if event == RegionEvent::Remove {
            self.drop_member(handle);
            return;
        }
        let Some(snapshot) = self.member(handle).map(Region::snapshot) else {
            return;
        };

        match event {
            RegionEvent::Update { side } => {
                if side.is_none() {
                    self.adjust_scroll(host, handle);
                }
                self.emit(RegionsEvent::Update {
                    region: snapshot,
                    side,
                });
            }
            RegionEvent::UpdateEnd => {
                self.tasks
                    .schedule(self.config.overlap_delay_ms, RegionTask::AvoidOverlap(handle));
                self.emit(RegionsEvent::Updated(snapshot));
            }
            RegionEvent::Play => {
                host.set_time(snapshot.start);
                host.play();
            }
            RegionEvent::Click => self.emit(RegionsEvent::Clicked(snapshot)),
            RegionEvent::DoubleClick => self.emit(RegionsEvent::DoubleClicked(snapshot)),
            RegionEvent::Over | RegionEvent::Leave | RegionEvent::Remove => {}
        }
    }

    fn drop_member(&mut self, handle: RegionHandle) {
        let Some(idx) = self.regions.iter().position(|r| r.handle() == handle) else {
            return;
        };
        let region = self.regions.remove(idx);
        let cancelled = self.tasks.cancel_where(|t| t.handle() == handle);
        self.scroll_tracked.remove(&handle);
        self.tracker.forget(handle);
        if self.gesture_region() == Some(handle) {
            self.gesture = None;
        }
        log::debug!(
            "Regions: dropped {} ({} deferred tasks cancelled)",
            region.id(),
            cancelled
        );
        self.emit(RegionsEvent::Removed(region.snapshot()));
    }

    fn gesture_region(&self) -> Option<RegionHandle> {
        match &self.gesture {
            Some(Gesture::Move { handle, .. } | Gesture::Resize { handle, .. }) => Some(*handle),
            _ => None,
        }
    }

    /// Scroll the host so a moved region stays in view
    fn adjust_scroll(&self, host: &mut dyn WaveformHost, handle: RegionHandle) {
        let (Some(wrapper), Some(region)) = (self.wrapper, self.member(handle)) else {
            return;
        };
        let visible = host.width();
        if host.dom().client_width(wrapper) <= visible {
            return;
        }
        let scroll = host.scroll();
        let rect = host.dom().bounding_rect(region.element());
        let left = rect.left() - scroll;
        let right = rect.right() - scroll;
        if left < 0.0 {
            host.set_scroll(scroll + left);
        } else if right > visible {
            host.set_scroll(scroll + right - visible);
        }
    }

    /// Attach the region's element while it intersects the visible window
    ///
    /// Only state changes touch the tree, so repeated calls with unchanged
    /// scroll do nothing.
    fn render_if_visible(&self, host: &mut dyn WaveformHost, handle: RegionHandle) {
        let (Some(container), Some(region)) = (self.container, self.member(handle)) else {
            return;
        };
        let duration = host.duration();
        if duration <= 0.0 {
            return;
        }
        let scroll_width = host.dom().client_width(container);
        let visible = layout::is_visible(
            region.start(),
            region.end(),
            duration,
            scroll_width,
            host.scroll(),
            host.width(),
        );
        let element = region.element();
        let attached = host.dom().parent(element) == Some(container);
        let dom = host.dom_mut();
        if visible && !attached {
            dom.append_child(container, element);
            log::trace!("Regions: attached {}", region.id());
        } else if !visible && attached {
            dom.detach(element);
            log::trace!("Regions: detached {}", region.id());
        }
    }

    fn render_tracked(&self, host: &mut dyn WaveformHost) {
        for region in &self.regions {
            if self.scroll_tracked.contains(&region.handle()) {
                self.render_if_visible(host, region.handle());
            }
        }
    }

    /// Push the region's label below the labels it overlaps
    fn avoid_overlap(&self, host: &mut dyn WaveformHost, handle: RegionHandle) {
        let Some(content) = self.member(handle).and_then(Region::content) else {
            return;
        };
        let dom = host.dom();
        let own = dom.bounding_rect(content);
        let others = self
            .regions
            .iter()
            .filter(|r| r.handle() != handle)
            .filter_map(Region::content)
            .map(|c| dom.bounding_rect(c));
        let offset = layout::stacking_offset(&own, others);
        host.dom_mut()
            .set_style(content, "margin-top", &Length::px(offset));
    }

    fn run_task(&mut self, host: &mut dyn WaveformHost, task: RegionTask) {
        if self.member(task.handle()).is_none() {
            return;
        }
        match task {
            RegionTask::Virtualize(handle) => {
                self.render_if_visible(host, handle);
                self.scroll_tracked.insert(handle);
            }
            RegionTask::AvoidOverlap(handle) => self.avoid_overlap(host, handle),
        }
    }

    fn on_ready(&mut self, host: &mut dyn WaveformHost, duration: f64) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            log::debug!("Regions: persisting {} deferred regions", pending.len());
        }
        for mut region in pending {
            region.set_total_duration(host.dom_mut(), duration);
            self.persist(region);
        }
    }

    fn on_time_update(&mut self, time: f64) {
        let transitions = self
            .tracker
            .update(time, self.regions.iter().map(|r| (r.handle(), r.bounds())));
        for handle in transitions.entered {
            if let Some(snapshot) = self.member(handle).map(Region::snapshot) {
                self.emit(RegionsEvent::In(snapshot));
            }
        }
        for handle in transitions.left {
            if let Some(snapshot) = self.member(handle).map(Region::snapshot) {
                self.emit(RegionsEvent::Out(snapshot));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pointer routing
    // ─────────────────────────────────────────────────────────────────────────

    /// Innermost interactive surface under `target`
    fn hit_test(&self, host: &dyn WaveformHost, target: ElementId) -> Option<Hit> {
        for el in host.dom().ancestors(target) {
            for region in &self.regions {
                if let Some(side) = region.handle_side(el) {
                    return Some(Hit::Handle(region.handle(), side));
                }
                if region.element() == el {
                    return Some(Hit::Body(region.handle()));
                }
            }
            if Some(el) == self.wrapper && self.selection.is_some() {
                return Some(Hit::Wrapper);
            }
        }
        None
    }

    /// Region whose element is `target` or contains it
    fn region_under(&self, host: &dyn WaveformHost, target: ElementId) -> Option<RegionHandle> {
        host.dom().ancestors(target).find_map(|el| {
            self.regions
                .iter()
                .find(|r| r.element() == el)
                .map(Region::handle)
        })
    }

    fn pointer_down(
        &mut self,
        host: &mut dyn WaveformHost,
        target: ElementId,
        x: f64,
        y: f64,
        button: PointerButton,
    ) -> bool {
        self.suppress_click = false;
        let mut gesture = match self.hit_test(host, target) {
            Some(Hit::Handle(handle, side)) => Gesture::Resize {
                handle,
                side,
                tracker: DragTracker::new(self.config.handle_drag_threshold),
            },
            Some(Hit::Body(handle)) => Gesture::Move {
                handle,
                tracker: DragTracker::new(self.config.drag_threshold),
            },
            // Selections wait for the duration; an armed token stays armed
            Some(Hit::Wrapper) => match &self.selection {
                Some(arm) if host.duration() > 0.0 => Gesture::Select {
                    params: arm.params.clone(),
                    tracker: DragTracker::new(arm.threshold),
                    anchor_x: None,
                },
                _ => return false,
            },
            None => return false,
        };
        let armed = match &mut gesture {
            Gesture::Move { tracker, .. }
            | Gesture::Resize { tracker, .. }
            | Gesture::Select { tracker, .. } => tracker.pointer_down(button, x, y),
        };
        if !armed {
            return false;
        }
        self.gesture = Some(gesture);
        true
    }

    fn pointer_move(&mut self, host: &mut dyn WaveformHost, x: f64, y: f64) -> bool {
        let Some(mut gesture) = self.gesture.take() else {
            return false;
        };
        match &mut gesture {
            Gesture::Move { handle, tracker } => {
                let handle = *handle;
                if let Some(region) = self.regions.iter_mut().find(|r| r.handle() == handle) {
                    let origin = host.dom().bounding_rect(region.element()).origin();
                    for event in tracker.pointer_move(x, y, origin) {
                        match event {
                            DragEvent::Start { .. } => region.drag_started(host.dom_mut()),
                            DragEvent::Move { dx, .. } => {
                                region.drag_move(host.dom_mut(), dx);
                            }
                            DragEvent::End => {}
                        }
                    }
                }
            }
            Gesture::Resize {
                handle,
                side,
                tracker,
            } => {
                let (handle, side) = (*handle, *side);
                if let Some(region) = self.regions.iter_mut().find(|r| r.handle() == handle) {
                    let origin = region
                        .resize_handles()
                        .map(|(l, r)| if side == Side::Start { l } else { r })
                        .map(|el| host.dom().bounding_rect(el).origin())
                        .unwrap_or_default();
                    for event in tracker.pointer_move(x, y, origin) {
                        if let DragEvent::Move { dx, .. } = event {
                            region.resize_move(host.dom_mut(), dx, side);
                        }
                    }
                }
            }
            Gesture::Select {
                params,
                tracker,
                anchor_x,
            } => {
                let origin = self
                    .wrapper
                    .map(|w| host.dom().bounding_rect(w).origin())
                    .unwrap_or_default();
                for event in tracker.pointer_move(x, y, origin) {
                    match event {
                        DragEvent::Start { x, .. } => {
                            *anchor_x = Some(x);
                            self.begin_selection(host, params.clone(), x);
                        }
                        DragEvent::Move { dx, x, .. } => {
                            let side = if anchor_x.is_some_and(|a| x > a) {
                                Side::End
                            } else {
                                Side::Start
                            };
                            if let Some(region) = self.creating.as_mut() {
                                region.apply_delta(host.dom_mut(), dx, Some(side));
                            }
                        }
                        DragEvent::End => {}
                    }
                }
            }
        }
        self.gesture = Some(gesture);
        true
    }

    /// Build the transient region at the anchor; it is drawn but not a member
    fn begin_selection(&mut self, host: &mut dyn WaveformHost, params: RegionParams, x: f64) {
        let (Some(wrapper), Some(container)) = (self.wrapper, self.container) else {
            return;
        };
        let duration = host.duration();
        let width = host.dom().client_width(wrapper);
        let start = px_to_time(x, width, duration);
        let end = px_to_time(x + self.config.selection_initial_width, width, duration);
        let params = RegionParams {
            start,
            end: Some(end),
            ..params
        };
        let handle = self.next_handle();
        let channels = host.channel_count();
        let region = Region::new(host.dom_mut(), handle, params, duration, channels, &self.config);
        host.dom_mut().append_child(container, region.element());
        self.creating = Some(region);
    }

    fn pointer_up(&mut self, host: &mut dyn WaveformHost) -> bool {
        let Some(mut gesture) = self.gesture.take() else {
            return false;
        };
        let ended = match &mut gesture {
            Gesture::Move { tracker, .. }
            | Gesture::Resize { tracker, .. }
            | Gesture::Select { tracker, .. } => tracker.pointer_up().is_some(),
        };

        match gesture {
            Gesture::Move { handle, .. } => {
                if let Some(region) = self.regions.iter_mut().find(|r| r.handle() == handle) {
                    if ended {
                        region.drag_ended(host.dom_mut());
                    }
                }
            }
            Gesture::Resize { handle, .. } => {
                if let Some(region) = self.regions.iter_mut().find(|r| r.handle() == handle) {
                    if ended {
                        region.resize_ended();
                    }
                }
            }
            Gesture::Select { .. } => {
                if let Some(region) = self.creating.take() {
                    self.persist(region);
                }
            }
        }
        self.suppress_click = ended;
        true
    }

    fn click(&mut self, host: &mut dyn WaveformHost, target: ElementId) -> bool {
        if std::mem::take(&mut self.suppress_click) {
            return true;
        }
        if let Some(region) = self.regions.iter_mut().find(|r| r.is_editable_content(target)) {
            region.content_clicked(host.dom_mut());
            return true;
        }
        let Some(handle) = self.region_under(host, target) else {
            return false;
        };
        self.with_member(handle, Region::clicked)
    }

    fn with_member(&mut self, handle: RegionHandle, f: impl FnOnce(&mut Region)) -> bool {
        match self.regions.iter_mut().find(|r| r.handle() == handle) {
            Some(region) => {
                f(region);
                true
            }
            None => false,
        }
    }

    fn exact_member(&self, target: ElementId) -> Option<RegionHandle> {
        self.regions
            .iter()
            .find(|r| r.element() == target)
            .map(Region::handle)
    }

    fn route_input(&mut self, host: &mut dyn WaveformHost, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown {
                target,
                x,
                y,
                button,
            } => self.pointer_down(host, target, x, y, button),
            InputEvent::PointerMove { x, y } => self.pointer_move(host, x, y),
            InputEvent::PointerUp { .. } => self.pointer_up(host),
            InputEvent::Click { target } => self.click(host, target),
            InputEvent::DoubleClick { target } => match self.region_under(host, target) {
                Some(handle) => self.with_member(handle, Region::double_clicked),
                None => false,
            },
            InputEvent::PointerEnter { target } => match self.exact_member(target) {
                Some(handle) => self.with_member(handle, Region::pointer_over),
                None => false,
            },
            InputEvent::PointerLeave { target } => match self.exact_member(target) {
                Some(handle) => self.with_member(handle, Region::pointer_left),
                None => false,
            },
            InputEvent::Blur { target } => {
                match self.regions.iter_mut().find(|r| r.is_editable_content(target)) {
                    Some(region) => {
                        region.content_blurred();
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Wheel { .. } => false,
        }
    }
}

impl Plugin for RegionsPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn init(&mut self, host: &mut dyn WaveformHost) -> PluginResult<()> {
        if self.is_initialized() {
            return Err(PluginError::AlreadyInitialized {
                plugin: PLUGIN_NAME,
            });
        }
        let wrapper = host.wrapper().ok_or(PluginError::MissingWrapper {
            plugin: PLUGIN_NAME,
        })?;

        let dom = host.dom_mut();
        let container = dom.create_element("div");
        dom.set_attribute(container, "part", "regions-container");
        dom.set_styles(
            container,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("z-index", "3"),
                ("pointer-events", "none"),
            ],
        );
        dom.append_child(wrapper, container);

        self.wrapper = Some(wrapper);
        self.container = Some(container);
        log::debug!("Regions: initialized");
        Ok(())
    }

    fn on_host_event(&mut self, host: &mut dyn WaveformHost, event: &HostEvent) {
        if !self.is_initialized() {
            return;
        }
        match *event {
            HostEvent::Ready { duration } => self.on_ready(host, duration),
            HostEvent::TimeUpdate { time } => self.on_time_update(time),
            HostEvent::Scroll { .. } | HostEvent::Zoom { .. } => self.render_tracked(host),
            HostEvent::Redraw => {}
        }
    }

    fn on_input(&mut self, host: &mut dyn WaveformHost, event: &InputEvent) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let consumed = self.route_input(host, event);
        self.flush(host);
        consumed
    }

    fn advance(&mut self, host: &mut dyn WaveformHost, elapsed_ms: u64) {
        for task in self.tasks.advance(elapsed_ms) {
            self.run_task(host, task);
        }
    }

    fn destroy(&mut self, host: &mut dyn WaveformHost) {
        self.clear_regions(host);
        let dom = host.dom_mut();
        for region in self.pending.drain(..).chain(self.creating.take()) {
            dom.detach(region.element());
        }
        if let Some(container) = self.container.take() {
            dom.detach(container);
        }
        self.wrapper = None;
        self.selection = None;
        self.gesture = None;
        self.suppress_click = false;
        self.scroll_tracked.clear();
        self.tracker.clear();
        self.tasks.clear();
        self.emitter.clear();
        log::debug!("Regions: destroyed");
    }
}
