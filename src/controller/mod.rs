//! Draw-interaction controller.
//!
//! Bridges a map surface's shape-created events into [`AreaCoordinates`]:
//! attaches one overlay group and one rectangle-only drawing tool, keeps at
//! most one drawn rectangle on the map, and tears everything down again on
//! [`ControllerHandle::detach`].

mod binding;

use crate::config::DrawConfig;
use crate::draw::{Color, ShapeStyle, SharedLayerGroup, ToolPosition, color::DEFAULT_STROKE};
use crate::geo::AreaCoordinates;
use crate::surface::{MapSurface, SurfaceError};
use binding::Binding;
use log::{debug, info, warn};
use std::rc::Rc;
use thiserror::Error;

/// Receives the ring of every successfully drawn rectangle.
pub type AreaCallback = Box<dyn FnMut(AreaCoordinates)>;

/// The two states of a controller binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Detached,
    Attached,
}

/// Errors surfaced by [`DrawController::attach`].
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("failed to set up drawing on the map: {0}")]
    ToolInitialization(#[from] SurfaceError),
}

/// Appearance of the drawing tool and the rectangles it produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerOptions {
    pub style: ShapeStyle,
    pub position: ToolPosition,
}

impl ControllerOptions {
    /// Builds options from the `[draw]` section of the configuration.
    pub fn from_config(config: &DrawConfig) -> Self {
        let color = Color::from_hex(&config.color).unwrap_or_else(|| {
            warn!("Unknown color '{}', using {}", config.color, DEFAULT_STROKE.to_hex());
            DEFAULT_STROKE
        });
        Self {
            style: ShapeStyle {
                color,
                weight: config.weight,
                opacity: config.opacity,
                fill_opacity: config.fill_opacity,
            },
            position: config.position,
        }
    }
}

/// Owner of the draw binding for one mounted map view.
///
/// The binding stays registered with the map until [`ControllerHandle::detach`]
/// is called. Dropping the controller together with every handle detaches it too.
pub struct DrawController<S: MapSurface> {
    options: ControllerOptions,
    binding: Option<Rc<Binding<S>>>,
}

impl<S: MapSurface> DrawController<S> {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            options,
            binding: None,
        }
    }

    /// Attaches drawing to `surface` and reports each drawn area to `on_area_selected`.
    ///
    /// Calling this again while a handle from an earlier call is still attached
    /// to the same surface does not register a second overlay or tool; it
    /// installs the new callback and returns a handle to the existing binding.
    /// A live binding on a different surface is detached first.
    ///
    /// # Errors
    /// Returns [`ControllerError::ToolInitialization`] when the surface refuses
    /// the overlay group or the drawing tool. Nothing stays registered in that case.
    #[must_use = "the handle is the only way to detach from the map"]
    pub fn attach<F>(
        &mut self,
        surface: Rc<S>,
        on_area_selected: F,
    ) -> Result<ControllerHandle<S>, ControllerError>
    where
        F: FnMut(AreaCoordinates) + 'static,
    {
        if let Some(binding) = self.live_binding() {
            if binding.is_on(&surface) {
                debug!("Draw controller already attached; replacing area callback");
                binding.replace_callback(Box::new(on_area_selected));
                return Ok(ControllerHandle { binding });
            }
            info!("Draw controller moving to a different map surface");
            binding.release();
        }

        let binding = Binding::attach(surface, self.options, Box::new(on_area_selected))?;
        self.binding = Some(Rc::clone(&binding));
        Ok(ControllerHandle { binding })
    }

    /// Current state of the most recent binding.
    pub fn lifecycle(&self) -> Lifecycle {
        self.binding
            .as_ref()
            .map_or(Lifecycle::Detached, |binding| binding.lifecycle())
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    fn live_binding(&self) -> Option<Rc<Binding<S>>> {
        self.binding
            .as_ref()
            .filter(|binding| binding.lifecycle() == Lifecycle::Attached)
            .cloned()
    }
}

/// Handle to an attached draw binding. Its one job is [`ControllerHandle::detach`].
#[must_use = "dropping the handle leaves no way to detach from the map"]
pub struct ControllerHandle<S: MapSurface> {
    binding: Rc<Binding<S>>,
}

impl<S: MapSurface> Clone for ControllerHandle<S> {
    fn clone(&self) -> Self {
        Self {
            binding: Rc::clone(&self.binding),
        }
    }
}

impl<S: MapSurface> ControllerHandle<S> {
    /// Unsubscribes from shape-created events and removes the drawing tool and
    /// the overlay group from the map. Calling it again is a no-op.
    pub fn detach(&self) {
        self.binding.release();
    }

    pub fn is_attached(&self) -> bool {
        self.binding.lifecycle() == Lifecycle::Attached
    }

    /// The overlay group holding the drawn rectangle, while attached.
    pub fn overlay(&self) -> Option<SharedLayerGroup> {
        self.binding.overlay()
    }

    /// Ring most recently handed to the callback.
    pub fn last_reported(&self) -> Option<AreaCoordinates> {
        self.binding.last_reported()
    }
}
