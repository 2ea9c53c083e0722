//! In-process map surface.
//!
//! Keeps the overlay, toolbar and listener registries a real map widget would
//! hold natively, and turns two drag end-points into the event a drawing tool
//! fires. Used by the command-line replay and by tests.

use super::{MapSurface, ShapeCreatedEvent, ShapeCreatedHandler, SubscriptionToken, SurfaceError};
use crate::config::MapConfig;
use crate::draw::{DrawTool, ShapeKind, SharedLayerGroup, Shape};
use crate::geo::{GeoError, Point};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type HandlerSlot = Rc<RefCell<ShapeCreatedHandler>>;

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub zoom: u8,
}

/// Base tile layer the map is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Attribution text shown in the map corner
    pub attribution: String,
}

/// Counters of unregister calls, for checking teardown happens exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownStats {
    pub overlays_removed: usize,
    pub tools_removed: usize,
    pub unsubscribed: usize,
}

/// Map surface whose registries live in process memory.
pub struct MemorySurface {
    viewport: Viewport,
    tile_layer: TileLayer,
    box_zoom: bool,
    overlays: RefCell<Vec<SharedLayerGroup>>,
    tools: RefCell<Vec<DrawTool>>,
    handlers: RefCell<Vec<(SubscriptionToken, HandlerSlot)>>,
    queued: RefCell<VecDeque<(ShapeCreatedEvent, Vec<HandlerSlot>)>>,
    next_token: Cell<u64>,
    overlay_refusal: RefCell<Option<String>>,
    tool_refusal: RefCell<Option<String>>,
    stats: Cell<TeardownStats>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::with_view(
            Viewport {
                center: Point {
                    lat: 0.0,
                    lng: 0.0,
                },
                zoom: 2,
            },
            TileLayer {
                url_template: String::new(),
                attribution: String::new(),
            },
            false,
        )
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a surface from the `[map]` section of the configuration.
    pub fn from_config(config: &MapConfig) -> Result<Self, GeoError> {
        let center = Point::new(config.center[0], config.center[1])?;
        Ok(Self::with_view(
            Viewport {
                center,
                zoom: config.zoom,
            },
            TileLayer {
                url_template: config.tile_url.clone(),
                attribution: config.attribution.clone(),
            },
            config.box_zoom,
        ))
    }

    pub fn with_view(viewport: Viewport, tile_layer: TileLayer, box_zoom: bool) -> Self {
        Self {
            viewport,
            tile_layer,
            box_zoom,
            overlays: RefCell::new(Vec::new()),
            tools: RefCell::new(Vec::new()),
            handlers: RefCell::new(Vec::new()),
            queued: RefCell::new(VecDeque::new()),
            next_token: Cell::new(1),
            overlay_refusal: RefCell::new(None),
            tool_refusal: RefCell::new(None),
            stats: Cell::new(TeardownStats::default()),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    /// Whether shift-drag box zoom is enabled (it competes with rectangle drawing).
    pub fn box_zoom(&self) -> bool {
        self.box_zoom
    }

    /// Makes subsequent overlay registrations fail with `reason`.
    pub fn refuse_overlays(&self, reason: impl Into<String>) {
        *self.overlay_refusal.borrow_mut() = Some(reason.into());
    }

    /// Makes subsequent tool registrations fail with `reason`.
    pub fn refuse_tools(&self, reason: impl Into<String>) {
        *self.tool_refusal.borrow_mut() = Some(reason.into());
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.borrow().len()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.borrow().len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn teardown_stats(&self) -> TeardownStats {
        self.stats.get()
    }

    /// Every shape currently rendered by any registered overlay, bottom to top.
    pub fn overlay_shapes(&self) -> Vec<Shape> {
        self.overlays
            .borrow()
            .iter()
            .flat_map(|group| group.borrow().layers().to_vec())
            .collect()
    }

    /// Completes a rectangle drag from `start` to `end` with the attached tool.
    ///
    /// The shape is styled by the tool and delivered to listeners immediately.
    pub fn draw_rectangle(&self, start: Point, end: Point) -> Result<(), SurfaceError> {
        let shape = self.rectangle_gesture(start, end)?;
        self.emit_shape_created(shape);
        Ok(())
    }

    /// Builds the shape a rectangle drag would produce, without firing it.
    pub fn rectangle_gesture(&self, start: Point, end: Point) -> Result<Shape, SurfaceError> {
        let tools = self.tools.borrow();
        let tool = tools
            .iter()
            .find(|tool| tool.allows(ShapeKind::Rectangle))
            .ok_or_else(|| SurfaceError::NoDrawingTool(ShapeKind::Rectangle.to_string()))?;
        let mut shape = Shape::rectangle(start, end);
        shape.apply_style(tool.rectangle_style());
        Ok(shape)
    }

    /// Delivers a shape-created event to every current listener.
    pub fn emit_shape_created(&self, shape: Shape) {
        let event = ShapeCreatedEvent { shape };
        let listeners = self.snapshot_listeners();
        deliver(&event, &listeners);
    }

    /// Queues a shape-created event for the listeners registered right now.
    ///
    /// Listeners removed before [`MemorySurface::dispatch_queued`] still
    /// receive it, the way an event already sitting in a UI event loop does.
    pub fn queue_shape_created(&self, shape: Shape) {
        let listeners = self.snapshot_listeners();
        self.queued
            .borrow_mut()
            .push_back((ShapeCreatedEvent { shape }, listeners));
    }

    /// Delivers queued events in order. Returns how many were delivered.
    pub fn dispatch_queued(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some((event, listeners)) = next else {
                break;
            };
            deliver(&event, &listeners);
            delivered += 1;
        }
        delivered
    }

    fn snapshot_listeners(&self) -> Vec<HandlerSlot> {
        self.handlers
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect()
    }

    fn bump_stats(&self, update: impl FnOnce(&mut TeardownStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

fn deliver(event: &ShapeCreatedEvent, listeners: &[HandlerSlot]) {
    for slot in listeners {
        match slot.try_borrow_mut() {
            Ok(mut handler) => (*handler)(event),
            Err(_) => warn!("Listener is already handling a shape-created event; skipping"),
        }
    }
}

impl MapSurface for MemorySurface {
    fn add_overlay_layer(&self, group: &SharedLayerGroup) -> Result<(), SurfaceError> {
        if let Some(reason) = self.overlay_refusal.borrow().as_ref() {
            return Err(SurfaceError::OverlayRejected(reason.clone()));
        }
        let mut overlays = self.overlays.borrow_mut();
        if overlays.iter().any(|existing| Rc::ptr_eq(existing, group)) {
            return Err(SurfaceError::AlreadyRegistered(group.borrow().id().to_string()));
        }
        debug!("Overlay {} added", group.borrow().id());
        overlays.push(Rc::clone(group));
        Ok(())
    }

    fn remove_overlay_layer(&self, group: &SharedLayerGroup) {
        self.overlays
            .borrow_mut()
            .retain(|existing| !Rc::ptr_eq(existing, group));
        self.bump_stats(|stats| stats.overlays_removed += 1);
    }

    fn add_drawing_tool(&self, tool: &DrawTool) -> Result<(), SurfaceError> {
        if let Some(reason) = self.tool_refusal.borrow().as_ref() {
            return Err(SurfaceError::ToolRejected(reason.clone()));
        }
        let mut tools = self.tools.borrow_mut();
        if tools.iter().any(|existing| existing.id() == tool.id()) {
            return Err(SurfaceError::AlreadyRegistered(tool.id().to_string()));
        }
        debug!("Drawing tool {} added at {:?}", tool.id(), tool.position());
        tools.push(tool.clone());
        Ok(())
    }

    fn remove_drawing_tool(&self, tool: &DrawTool) {
        self.tools
            .borrow_mut()
            .retain(|existing| existing.id() != tool.id());
        self.bump_stats(|stats| stats.tools_removed += 1);
    }

    fn on_shape_created(&self, handler: ShapeCreatedHandler) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        self.handlers
            .borrow_mut()
            .push((token, Rc::new(RefCell::new(handler))));
        token
    }

    fn off(&self, token: SubscriptionToken) {
        self.handlers
            .borrow_mut()
            .retain(|(existing, _)| *existing != token);
        self.bump_stats(|stats| stats.unsubscribed += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{LayerGroup, ShapeStyle, ToolPosition};

    fn point(lat: f64, lng: f64) -> Point {
        Point::new(lat, lng).unwrap()
    }

    #[test]
    fn from_config_uses_map_section() {
        let config = MapConfig::default();
        let surface = MemorySurface::from_config(&config).unwrap();
        assert_eq!(surface.viewport().zoom, 10);
        assert_eq!(surface.viewport().center, point(55.751244, 37.618423));
        assert!(surface.tile_layer().url_template.contains("openstreetmap"));
        assert!(!surface.box_zoom());
    }

    #[test]
    fn duplicate_overlay_is_rejected() {
        let surface = MemorySurface::new();
        let group = LayerGroup::shared();
        surface.add_overlay_layer(&group).unwrap();
        assert!(matches!(
            surface.add_overlay_layer(&group),
            Err(SurfaceError::AlreadyRegistered(_))
        ));
        assert_eq!(surface.overlay_count(), 1);
    }

    #[test]
    fn gesture_requires_a_rectangle_tool() {
        let surface = MemorySurface::new();
        assert!(matches!(
            surface.draw_rectangle(point(0.0, 0.0), point(1.0, 1.0)),
            Err(SurfaceError::NoDrawingTool(_))
        ));
    }

    #[test]
    fn gesture_is_styled_by_the_tool() {
        let surface = MemorySurface::new();
        let style = ShapeStyle {
            weight: 7.0,
            ..ShapeStyle::default()
        };
        surface
            .add_drawing_tool(&DrawTool::rectangle_only(style, ToolPosition::TopRight))
            .unwrap();
        let shape = surface
            .rectangle_gesture(point(0.0, 0.0), point(1.0, 1.0))
            .unwrap();
        assert_eq!(shape.style(), Some(&style));
    }

    #[test]
    fn off_stops_immediate_delivery() {
        let surface = MemorySurface::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let token = surface.on_shape_created(Box::new(move |_: &ShapeCreatedEvent| {
            counter.set(counter.get() + 1)
        }));

        surface.emit_shape_created(Shape::rectangle(point(0.0, 0.0), point(1.0, 1.0)));
        surface.off(token);
        surface.emit_shape_created(Shape::rectangle(point(0.0, 0.0), point(1.0, 1.0)));

        assert_eq!(hits.get(), 1);
        assert_eq!(surface.subscriber_count(), 0);
    }

    #[test]
    fn queued_events_reach_listeners_captured_at_queue_time() {
        let surface = MemorySurface::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let token = surface.on_shape_created(Box::new(move |_: &ShapeCreatedEvent| {
            counter.set(counter.get() + 1)
        }));

        surface.queue_shape_created(Shape::rectangle(point(0.0, 0.0), point(1.0, 1.0)));
        surface.off(token);

        assert_eq!(surface.dispatch_queued(), 1);
        assert_eq!(hits.get(), 1);
    }
}
