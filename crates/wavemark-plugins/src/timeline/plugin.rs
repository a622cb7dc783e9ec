//! Timeline ruler plugin
//!
//! Lays out one notch per time interval along the waveform and keeps only
//! the notches inside the visible scroll window attached. The ruler is
//! rebuilt from scratch whenever the host becomes ready or redraws.

use wavemark_core::{
    Dom, ElementId, Emitter, HostEvent, Length, Plugin, PluginError, PluginResult,
    SubscriptionId, TaskQueue, WaveformHost,
};

use super::config::TimelineConfig;
use super::intervals::{
    default_primary_label_interval, default_secondary_label_interval, default_time_interval,
    format_time,
};

const PLUGIN_NAME: &str = "timeline";

/// Events emitted by the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The ruler was (re)built
    Ready,
}

/// Label level of a notch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotchKind {
    Primary,
    Secondary,
    Tick,
}

impl NotchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotchKind::Primary => "primary",
            NotchKind::Secondary => "secondary",
            NotchKind::Tick => "tick",
        }
    }

    fn for_index(index: u64, primary: u32, secondary: u32) -> Self {
        let divides = |n: u32| n > 0 && index % u64::from(n) == 0;
        if divides(primary) {
            NotchKind::Primary
        } else if divides(secondary) {
            NotchKind::Secondary
        } else {
            NotchKind::Tick
        }
    }
}

/// One ruler mark
#[derive(Debug, Clone)]
pub struct Notch {
    element: ElementId,
    time: f64,
    offset: f64,
    kind: NotchKind,
    visible: bool,
}

impl Notch {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Time the notch marks, before the configured offset
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Horizontal position in wrapper pixels
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn kind(&self) -> NotchKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Time-axis ruler drawn under (or over) the waveform
#[derive(Debug)]
pub struct TimelinePlugin {
    config: TimelineConfig,
    custom_container: Option<ElementId>,
    parent: Option<ElementId>,
    timeline: Option<ElementId>,
    notches: Vec<Notch>,
    /// Build generation awaiting its first visibility pass
    tasks: TaskQueue<u64>,
    generation: u64,
    /// Visibility follows scroll once the first pass has run
    tracking: bool,
    emitter: Emitter<TimelineEvent>,
}

impl Default for TimelinePlugin {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl TimelinePlugin {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            custom_container: None,
            parent: None,
            timeline: None,
            notches: Vec::new(),
            tasks: TaskQueue::new(),
            generation: 0,
            tracking: false,
            emitter: Emitter::new(),
        }
    }

    /// Draw into `container` instead of the host's wrapper
    pub fn with_container(mut self, container: ElementId) -> Self {
        self.custom_container = Some(container);
        self
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.parent.is_some()
    }

    /// Root element of the current ruler
    pub fn timeline(&self) -> Option<ElementId> {
        self.timeline
    }

    pub fn notches(&self) -> &[Notch] {
        &self.notches
    }

    pub fn on(&mut self, listener: impl FnMut(&TimelineEvent) + 'static) -> SubscriptionId {
        self.emitter.on(listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    fn duration(&self, host: &dyn WaveformHost) -> f64 {
        match host.duration() {
            d if d > 0.0 => d,
            _ => self.config.duration.unwrap_or(0.0),
        }
    }

    /// Replace the ruler with one laid out for the current zoom level
    fn build(&mut self, host: &mut dyn WaveformHost) {
        let Some(parent) = self.parent else {
            return;
        };
        let dom = host.dom_mut();
        if let Some(old) = self.timeline.take() {
            dom.detach(old);
        }
        self.notches.clear();
        self.tasks.clear();
        self.tracking = false;
        self.generation += 1;

        let duration = self.duration(host);
        let surface = host.wrapper().unwrap_or(parent);
        let scroll_width = host.dom().client_width(surface);
        let px_per_sec = if duration > 0.0 { scroll_width / duration } else { 0.0 };

        let dom = host.dom_mut();
        let timeline = dom.create_element("div");
        dom.set_attribute(timeline, "part", "timeline");
        let height = Length::px(self.config.height);
        let font_size = Length::px(self.config.height / 2.0);
        dom.set_styles(
            timeline,
            &[
                ("position", "relative"),
                ("height", height.as_str()),
                ("overflow", "hidden"),
                ("font-size", font_size.as_str()),
                ("white-space", "nowrap"),
            ],
        );

        if px_per_sec > 0.0 {
            let interval = self
                .config
                .time_interval
                .filter(|i| *i > 0.0)
                .unwrap_or_else(|| default_time_interval(px_per_sec));
            let primary = self
                .config
                .primary_label_interval
                .unwrap_or_else(|| default_primary_label_interval(px_per_sec));
            let secondary = self
                .config
                .secondary_label_interval
                .unwrap_or_else(|| default_secondary_label_interval(px_per_sec));

            let mut index = 0u64;
            loop {
                let time = index as f64 * interval;
                if time >= duration {
                    break;
                }
                let kind = NotchKind::for_index(index, primary, secondary);
                let offset = (time + self.config.time_offset) * px_per_sec;
                let element = self.make_notch(dom, time, offset, kind);
                self.notches.push(Notch {
                    element,
                    time,
                    offset,
                    kind,
                    visible: false,
                });
                index += 1;
            }
            log::debug!(
                "Timeline: {} notches every {}s at {:.1}px/s",
                self.notches.len(),
                interval,
                px_per_sec
            );
        }

        dom.append_child(parent, timeline);
        self.timeline = Some(timeline);
        self.tasks.schedule(0, self.generation);
        self.emitter.emit(&TimelineEvent::Ready);
    }

    fn make_notch(&self, dom: &mut Dom, time: f64, offset: f64, kind: NotchKind) -> ElementId {
        let notch = dom.create_element("div");
        let opacity = self.config.secondary_label_opacity.to_string();
        let left = Length::px(offset);
        dom.set_styles(
            notch,
            &[
                ("position", "absolute"),
                ("z-index", "1"),
                ("width", "0"),
                ("height", "50%"),
                ("bottom", "0"),
                ("overflow", "visible"),
                ("border-left", "1px solid currentColor"),
                ("opacity", opacity.as_str()),
                ("left", left.as_str()),
            ],
        );
        if kind != NotchKind::Tick {
            dom.set_styles(notch, &[("height", "100%"), ("text-indent", "3px")]);
            dom.set_text(notch, &format_time(time));
        }
        if kind == NotchKind::Primary {
            dom.set_style(notch, "opacity", "1");
        }
        dom.set_attribute(
            notch,
            "part",
            &format!("timeline-notch timeline-notch-{}", kind.as_str()),
        );
        notch
    }

    /// Attach notches strictly inside `(left, right)`, detach the rest
    fn render_visible(&mut self, host: &mut dyn WaveformHost, left: f64, right: f64) {
        let Some(timeline) = self.timeline else {
            return;
        };
        let dom = host.dom_mut();
        for notch in self.notches.iter_mut() {
            let width = dom.client_width(notch.element);
            let visible = notch.offset > left && notch.offset + width < right;
            if visible == notch.visible {
                continue;
            }
            notch.visible = visible;
            if visible {
                dom.append_child(timeline, notch.element);
            } else {
                dom.detach(notch.element);
            }
        }
    }
}

impl Plugin for TimelinePlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn init(&mut self, host: &mut dyn WaveformHost) -> PluginResult<()> {
        if self.is_initialized() {
            return Err(PluginError::AlreadyInitialized {
                plugin: PLUGIN_NAME,
            });
        }
        let parent = self
            .custom_container
            .or_else(|| host.wrapper())
            .ok_or(PluginError::MissingWrapper {
                plugin: PLUGIN_NAME,
            })?;
        self.parent = Some(parent);
        if self.duration(host) > 0.0 {
            self.build(host);
        }
        Ok(())
    }

    fn on_host_event(&mut self, host: &mut dyn WaveformHost, event: &HostEvent) {
        if !self.is_initialized() {
            return;
        }
        match *event {
            HostEvent::Ready { .. } | HostEvent::Redraw => self.build(host),
            HostEvent::Scroll { left, right, .. } if self.tracking => {
                self.render_visible(host, left, right)
            }
            _ => {}
        }
    }

    fn advance(&mut self, host: &mut dyn WaveformHost, elapsed_ms: u64) {
        for generation in self.tasks.advance(elapsed_ms) {
            if generation == self.generation {
                let width = host.width();
                self.render_visible(host, 0.0, width);
                self.tracking = true;
            }
        }
    }

    fn destroy(&mut self, host: &mut dyn WaveformHost) {
        if let Some(timeline) = self.timeline.take() {
            host.dom_mut().detach(timeline);
        }
        self.notches.clear();
        self.tasks.clear();
        self.tracking = false;
        self.parent = None;
        self.emitter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wavemark_core::HeadlessHost;

    fn pump(host: &mut HeadlessHost, plugin: &mut TimelinePlugin) {
        for event in host.take_events() {
            plugin.on_host_event(host, &event);
        }
    }

    fn attached(host: &HeadlessHost, plugin: &TimelinePlugin) -> Vec<f64> {
        let timeline = plugin.timeline().unwrap();
        host.dom()
            .children(timeline)
            .iter()
            .filter_map(|&el| plugin.notches().iter().find(|n| n.element() == el))
            .map(Notch::time)
            .collect()
    }

    #[test]
    fn test_builds_notches_on_ready() {
        let mut host = HeadlessHost::new(1000.0, 100.0);
        let mut plugin = TimelinePlugin::default();
        let ready = Rc::new(RefCell::new(0));
        let sink = ready.clone();
        plugin.on(move |_| *sink.borrow_mut() += 1);
        plugin.init(&mut host).unwrap();
        assert!(plugin.timeline().is_none(), "Nothing to draw without a duration");

        host.load(10.0, 1);
        pump(&mut host, &mut plugin);
        assert_eq!(*ready.borrow(), 1);

        // 100px/s: a notch per second, primary every 10, secondary every 5
        let notches = plugin.notches();
        assert_eq!(notches.len(), 10);
        assert_eq!(notches[0].kind(), NotchKind::Primary);
        assert_eq!(notches[5].kind(), NotchKind::Secondary);
        assert_eq!(notches[3].kind(), NotchKind::Tick);
        assert_eq!(notches[3].offset(), 300.0);
        assert_eq!(host.dom().text(notches[5].element()), Some("5"));
        assert_eq!(host.dom().text(notches[3].element()), None);
        assert!(host
            .dom()
            .has_part(notches[5].element(), "timeline-notch-secondary"));
    }

    #[test]
    fn test_first_visibility_pass_is_deferred() {
        let mut host = HeadlessHost::new(1000.0, 100.0);
        host.load(10.0, 1);
        let mut plugin = TimelinePlugin::default();
        plugin.init(&mut host).unwrap();
        assert!(attached(&host, &plugin).is_empty());

        plugin.advance(&mut host, 0);
        // The notch at 0 sits on the window edge and stays hidden
        assert_eq!(
            attached(&host, &plugin),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn test_notches_follow_scroll() {
        let mut host = HeadlessHost::new(1000.0, 100.0).with_min_px_per_sec(100.0);
        host.load(100.0, 1);
        let mut plugin = TimelinePlugin::default();
        plugin.init(&mut host).unwrap();
        host.take_events();

        // Scroll before the first pass is ignored
        host.set_scroll(2000.0);
        pump(&mut host, &mut plugin);
        assert!(attached(&host, &plugin).is_empty());

        plugin.advance(&mut host, 0);
        assert_eq!(attached(&host, &plugin).len(), 9);

        host.set_scroll(4500.0);
        pump(&mut host, &mut plugin);
        let times = attached(&host, &plugin);
        assert_eq!(times.len(), 9);
        assert!(times.iter().all(|t| (46.0..=54.0).contains(t)));
    }

    #[test]
    fn test_rebuild_on_redraw() {
        let mut host = HeadlessHost::new(1000.0, 100.0);
        host.load(10.0, 1);
        let mut plugin = TimelinePlugin::default();
        plugin.init(&mut host).unwrap();
        host.take_events();
        let old = plugin.timeline().unwrap();

        host.zoom(200.0);
        pump(&mut host, &mut plugin);
        let new = plugin.timeline().unwrap();
        assert_ne!(old, new);
        assert_eq!(host.dom().parent(old), None);
        assert_eq!(plugin.notches()[1].offset(), 200.0);
    }

    #[test]
    fn test_custom_intervals_and_offset() {
        let config = TimelineConfig {
            time_interval: Some(2.0),
            primary_label_interval: Some(2),
            secondary_label_interval: Some(1),
            time_offset: 0.5,
            ..Default::default()
        };
        let mut host = HeadlessHost::new(1000.0, 100.0);
        host.load(10.0, 1);
        let mut plugin = TimelinePlugin::new(config);
        plugin.init(&mut host).unwrap();

        let notches = plugin.notches();
        assert_eq!(notches.len(), 5);
        assert_eq!(notches[0].offset(), 50.0);
        assert_eq!(notches[1].kind(), NotchKind::Secondary);
        assert_eq!(notches[2].kind(), NotchKind::Primary);
        assert_eq!(notches[2].time(), 4.0);
    }

    #[test]
    fn test_custom_container() {
        let mut host = HeadlessHost::new(1000.0, 100.0);
        host.load(10.0, 1);
        let dom = host.dom_mut();
        let below = dom.create_element("div");
        let root = dom.root();
        dom.append_child(root, below);

        let mut plugin = TimelinePlugin::default().with_container(below);
        plugin.init(&mut host).unwrap();
        assert_eq!(host.dom().parent(plugin.timeline().unwrap()), Some(below));
    }

    #[test]
    fn test_duration_override_and_destroy() {
        let config = TimelineConfig {
            duration: Some(20.0),
            ..Default::default()
        };
        let mut host = HeadlessHost::new(1000.0, 100.0);
        let mut plugin = TimelinePlugin::new(config);
        plugin.init(&mut host).unwrap();
        assert!(plugin.init(&mut host).is_err());

        // 50px/s over the viewport width
        assert_eq!(plugin.notches().len(), 20);
        let timeline = plugin.timeline().unwrap();

        plugin.destroy(&mut host);
        assert_eq!(host.dom().parent(timeline), None);
        assert!(!plugin.is_initialized());
    }
}
