use super::{AreaCallback, ControllerError, ControllerOptions, Lifecycle};
use crate::draw::{DrawTool, LayerGroup, ShapeStyle, SharedLayerGroup};
use crate::geo::AreaCoordinates;
use crate::surface::{MapSurface, ShapeCreatedEvent, SubscriptionToken};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Everything registered with the map for one binding.
///
/// `Some` means attached; taking it out is the detach transition.
struct Attachment {
    overlay: SharedLayerGroup,
    tool: DrawTool,
    token: SubscriptionToken,
}

/// State reachable from the shape-created listener.
///
/// The listener holds this through a `Weak`, so the surface never keeps a
/// controller alive.
struct DrawState {
    attachment: RefCell<Option<Attachment>>,
    style: ShapeStyle,
    callback: RefCell<Option<AreaCallback>>,
    last_reported: Cell<Option<AreaCoordinates>>,
}

impl DrawState {
    fn lifecycle(&self) -> Lifecycle {
        if self.attachment.borrow().is_some() {
            Lifecycle::Attached
        } else {
            Lifecycle::Detached
        }
    }

    fn overlay(&self) -> Option<SharedLayerGroup> {
        self.attachment
            .borrow()
            .as_ref()
            .map(|attachment| Rc::clone(&attachment.overlay))
    }

    fn on_shape_created(&self, event: &ShapeCreatedEvent) {
        // Events already queued when detach ran still arrive here.
        let Some(overlay) = self.overlay() else {
            debug!("Ignoring shape-created event after detach");
            return;
        };

        let mut shape = event.shape.clone();
        shape.apply_style(self.style);
        let kind = shape.kind();
        let bounds = shape.rectangle_bounds();

        match overlay.try_borrow_mut() {
            Ok(mut group) => {
                group.clear_layers();
                group.add_layer(shape);
            }
            Err(_) => {
                error!("Overlay is borrowed elsewhere; dropping drawn {kind}");
                return;
            }
        }

        match bounds {
            Ok(bounds) => {
                let ring = AreaCoordinates::from_bounds(&bounds);
                debug!("Rectangle coordinates: {:?}", ring.to_pairs());
                self.last_reported.set(Some(ring));
                self.notify(ring);
            }
            Err(err) => error!("Error processing drawn {kind}: {err}"),
        }
    }

    fn notify(&self, ring: AreaCoordinates) {
        // Taken out while it runs so the callback may detach or re-attach.
        let Some(mut callback) = self.callback.borrow_mut().take() else {
            return;
        };
        callback(ring);

        if self.lifecycle() == Lifecycle::Attached {
            let mut slot = self.callback.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
}

/// One attach/detach cycle of a controller on a map surface.
pub(super) struct Binding<S: MapSurface> {
    surface: Rc<S>,
    state: Rc<DrawState>,
}

impl<S: MapSurface> Binding<S> {
    /// Registers overlay, tool and listener with `surface`, in that order.
    ///
    /// A failure after the overlay went in removes it again, so the surface
    /// is left with both or neither.
    pub(super) fn attach(
        surface: Rc<S>,
        options: ControllerOptions,
        callback: AreaCallback,
    ) -> Result<Rc<Self>, ControllerError> {
        let overlay = LayerGroup::shared();
        surface.add_overlay_layer(&overlay)?;

        let tool = DrawTool::rectangle_only(options.style, options.position);
        if let Err(err) = surface.add_drawing_tool(&tool) {
            surface.remove_overlay_layer(&overlay);
            return Err(err.into());
        }

        let state = Rc::new(DrawState {
            attachment: RefCell::new(None),
            style: options.style,
            callback: RefCell::new(Some(callback)),
            last_reported: Cell::new(None),
        });

        let listener = Rc::downgrade(&state);
        let token = surface.on_shape_created(Box::new(move |event: &ShapeCreatedEvent| {
            if let Some(state) = listener.upgrade() {
                state.on_shape_created(event);
            }
        }));

        info!(
            "Draw controller attached ({}, {}, {})",
            overlay.borrow().id(),
            tool.id(),
            token
        );
        *state.attachment.borrow_mut() = Some(Attachment {
            overlay,
            tool,
            token,
        });

        Ok(Rc::new(Self { surface, state }))
    }

    pub(super) fn is_on(&self, surface: &Rc<S>) -> bool {
        Rc::ptr_eq(&self.surface, surface)
    }

    pub(super) fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle()
    }

    pub(super) fn overlay(&self) -> Option<SharedLayerGroup> {
        self.state.overlay()
    }

    pub(super) fn last_reported(&self) -> Option<AreaCoordinates> {
        self.state.last_reported.get()
    }

    pub(super) fn replace_callback(&self, callback: AreaCallback) {
        *self.state.callback.borrow_mut() = Some(callback);
    }

    /// Unregisters listener, tool and overlay. Only the first call does anything.
    pub(super) fn release(&self) {
        let Some(attachment) = self.state.attachment.borrow_mut().take() else {
            debug!("Draw controller already detached");
            return;
        };

        self.surface.off(attachment.token);
        self.surface.remove_drawing_tool(&attachment.tool);
        self.surface.remove_overlay_layer(&attachment.overlay);
        match attachment.overlay.try_borrow_mut() {
            Ok(mut group) => group.clear_layers(),
            Err(_) => warn!("Overlay is borrowed elsewhere; drawn shape not cleared"),
        }
        if let Ok(mut callback) = self.state.callback.try_borrow_mut() {
            callback.take();
        }
        info!("Draw controller detached");
    }
}

impl<S: MapSurface> Drop for Binding<S> {
    fn drop(&mut self) {
        if self.lifecycle() == Lifecycle::Attached {
            warn!("Draw controller dropped while attached; detaching");
            self.release();
        }
    }
}
