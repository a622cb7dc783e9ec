//! Wheel zoom plugin
//!
//! Vertical wheel motion over the waveform changes the zoom level while
//! keeping the time under the pointer at the same place on screen.

use wavemark_core::{
    ElementId, Emitter, InputEvent, Plugin, PluginError, PluginResult, SubscriptionId,
    WaveformHost,
};

use super::config::ZoomConfig;

const PLUGIN_NAME: &str = "zoom";

/// Events emitted by the zoom plugin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomEvent {
    /// A zoom step was applied
    Zoomed { px_per_sec: f64, scroll: f64 },
}

/// Pointer-anchored wheel zoom
#[derive(Debug)]
pub struct ZoomPlugin {
    config: ZoomConfig,
    wrapper: Option<ElementId>,
    max_zoom: f64,
    accumulated: f64,
    /// Zoom level at the first applied step; anchors the exponential factor
    initial_zoom: Option<f64>,
    emitter: Emitter<ZoomEvent>,
}

impl Default for ZoomPlugin {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomPlugin {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            max_zoom: config.max_zoom.unwrap_or(f64::INFINITY),
            config,
            wrapper: None,
            accumulated: 0.0,
            initial_zoom: None,
            emitter: Emitter::new(),
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Effective upper bound on pixels per second
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn on(&mut self, listener: impl FnMut(&ZoomEvent) + 'static) -> SubscriptionId {
        self.emitter.on(listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    /// Next zoom level for an accumulated wheel delta
    fn next_zoom(&mut self, current: f64, delta: f64) -> f64 {
        let zoom = if self.config.exponential_zooming {
            let initial = *self.initial_zoom.get_or_insert(current);
            let factor = if initial > 0.0 && self.config.iterations > 0 {
                (self.max_zoom / initial).powf(1.0 / f64::from(self.config.iterations))
            } else {
                1.0
            };
            if delta > 0.0 {
                current * factor
            } else {
                current / factor
            }
        } else {
            current + delta * self.config.scale
        };
        zoom.max(0.0).min(self.max_zoom)
    }

    /// Apply the accumulated delta with the pointer at content `x`
    fn apply(&mut self, host: &mut dyn WaveformHost, wrapper: ElementId, x: f64) {
        let delta = std::mem::take(&mut self.accumulated);
        let duration = host.duration();
        if duration <= 0.0 {
            return;
        }
        let width = host.width();
        let scroll = host.scroll();
        let current = host.dom().client_width(wrapper) / duration;
        if current <= 0.0 {
            return;
        }

        let pointer_time = x / current;
        let viewport_x = x - scroll;
        let zoom = self.next_zoom(current, delta);

        if zoom * duration < width {
            host.zoom(width / duration);
            host.set_scroll(0.0);
        } else {
            host.zoom(zoom);
            host.set_scroll(pointer_time * zoom - viewport_x);
        }
        log::trace!("Zoom: {:.1} -> {:.1}px/s", current, host.min_px_per_sec());
        self.emitter.emit(&ZoomEvent::Zoomed {
            px_per_sec: host.min_px_per_sec(),
            scroll: host.scroll(),
        });
    }
}

impl Plugin for ZoomPlugin {
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
        self.max_zoom = self
            .config
            .max_zoom
            .unwrap_or_else(|| host.dom().client_width(wrapper));
        self.wrapper = Some(wrapper);
        Ok(())
    }

    fn on_input(&mut self, host: &mut dyn WaveformHost, event: &InputEvent) -> bool {
        let InputEvent::Wheel {
            target,
            x,
            delta_x,
            delta_y,
        } = *event
        else {
            return false;
        };
        let Some(wrapper) = self.wrapper else {
            return false;
        };
        if !host.dom().contains(wrapper, target) || delta_x.abs() >= delta_y.abs() {
            return false;
        }

        self.accumulated -= delta_y;
        if self.config.delta_threshold == 0.0
            || self.accumulated.abs() >= self.config.delta_threshold
        {
            self.apply(host, wrapper, x);
        }
        true
    }

    fn destroy(&mut self, _host: &mut dyn WaveformHost) {
        self.wrapper = None;
        self.accumulated = 0.0;
        self.initial_zoom = None;
        self.emitter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wavemark_core::{HeadlessHost, HostEvent};

    /// 10s on a 1000px viewport, fitted at 100px/s
    fn setup(config: ZoomConfig) -> (HeadlessHost, ZoomPlugin) {
        let mut host = HeadlessHost::new(1000.0, 100.0);
        host.load(10.0, 1);
        host.take_events();
        let mut plugin = ZoomPlugin::new(config);
        plugin.init(&mut host).unwrap();
        (host, plugin)
    }

    fn wheel(host: &mut HeadlessHost, plugin: &mut ZoomPlugin, x: f64, delta_y: f64) -> bool {
        let target = host.wrapper().unwrap();
        plugin.on_input(
            host,
            &InputEvent::Wheel {
                target,
                x,
                delta_x: 0.0,
                delta_y,
            },
        )
    }

    #[test]
    fn test_zoom_in_keeps_pointer_time() {
        let (mut host, mut plugin) = setup(ZoomConfig::default());
        assert_eq!(plugin.max_zoom(), 1000.0);

        assert!(wheel(&mut host, &mut plugin, 500.0, -100.0));
        assert_eq!(host.min_px_per_sec(), 150.0);
        assert_eq!(host.scroll(), 250.0);

        // 5s was under the pointer before and still is
        let viewport_x = 500.0;
        assert_eq!((host.scroll() + viewport_x) / host.min_px_per_sec(), 5.0);
    }

    #[test]
    fn test_small_deltas_accumulate() {
        let (mut host, mut plugin) = setup(ZoomConfig::default());
        wheel(&mut host, &mut plugin, 0.0, -2.0);
        wheel(&mut host, &mut plugin, 0.0, -2.0);
        assert!(host.take_events().is_empty());

        wheel(&mut host, &mut plugin, 0.0, -2.0);
        assert_eq!(host.min_px_per_sec(), 103.0);
    }

    #[test]
    fn test_zoom_out_fits_and_resets_scroll() {
        let (mut host, mut plugin) = setup(ZoomConfig::default());
        wheel(&mut host, &mut plugin, 500.0, -100.0);
        assert_eq!(host.scroll(), 250.0);

        wheel(&mut host, &mut plugin, 500.0, 200.0);
        assert_eq!(host.min_px_per_sec(), 100.0);
        assert_eq!(host.scroll(), 0.0);
    }

    #[test]
    fn test_capped_at_max_zoom() {
        let (mut host, mut plugin) = setup(ZoomConfig::default());
        wheel(&mut host, &mut plugin, 0.0, -10_000.0);
        assert_eq!(host.min_px_per_sec(), 1000.0);
    }

    #[test]
    fn test_horizontal_scroll_ignored() {
        let (mut host, mut plugin) = setup(ZoomConfig::default());
        let target = host.wrapper().unwrap();
        let consumed = plugin.on_input(
            &mut host,
            &InputEvent::Wheel {
                target,
                x: 0.0,
                delta_x: 10.0,
                delta_y: 5.0,
            },
        );
        assert!(!consumed);
        assert_eq!(host.min_px_per_sec(), 0.0);
    }

    #[test]
    fn test_exponential_steps() {
        let config = ZoomConfig {
            exponential_zooming: true,
            ..Default::default()
        };
        let (mut host, mut plugin) = setup(config);
        let zooms = Rc::new(RefCell::new(Vec::new()));
        let sink = zooms.clone();
        plugin.on(move |e| match e {
            ZoomEvent::Zoomed { px_per_sec, .. } => sink.borrow_mut().push(*px_per_sec),
        });

        wheel(&mut host, &mut plugin, 0.0, -10.0);
        let expected = 100.0 * 10f64.powf(1.0 / 20.0);
        assert!((host.min_px_per_sec() - expected).abs() < 1e-9);
        assert_eq!(*zooms.borrow(), vec![host.min_px_per_sec()]);

        let px_per_sec = host.min_px_per_sec();
        assert_eq!(
            host.take_events(),
            vec![HostEvent::Zoom { px_per_sec }, HostEvent::Redraw]
        );
    }
}
