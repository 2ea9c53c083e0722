//! Result dialog for the selected area.
//!
//! Holds the most recently reported ring and renders it as the text of a
//! modal: title, one numbered line per point, and a close button label.

use crate::config::PresenterConfig;
use crate::geo::AreaCoordinates;
use std::fmt::Write as _;

/// Dialog state: the last reported area and whether the dialog is open.
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    config: PresenterConfig,
    coords: Option<AreaCoordinates>,
    open: bool,
}

impl Default for ResultPresenter {
    fn default() -> Self {
        Self::new(PresenterConfig::default())
    }
}

impl ResultPresenter {
    pub fn new(config: PresenterConfig) -> Self {
        Self {
            config,
            coords: None,
            open: false,
        }
    }

    /// Stores `coords` and opens the dialog.
    pub fn show(&mut self, coords: AreaCoordinates) {
        self.coords = Some(coords);
        self.open = true;
    }

    /// Closes the dialog; the coordinates stay for the next time it opens.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn coords(&self) -> Option<&AreaCoordinates> {
        self.coords.as_ref()
    }

    /// Renders the dialog body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.config.title);
        match &self.coords {
            None => {
                let _ = writeln!(out, "{}", self.config.empty_text);
            }
            Some(coords) => {
                for line in format_points(coords, self.config.decimals) {
                    let _ = writeln!(out, "{line}");
                }
            }
        }
        let _ = write!(out, "[{}]", self.config.close_label);
        out
    }
}

/// Formats each point of the ring as `"{n}. lat: {lat} lng: {lng}"`, 1-based.
pub fn format_points(coords: &AreaCoordinates, decimals: usize) -> Vec<String> {
    coords
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            format!(
                "{}. lat: {:.prec$} lng: {:.prec$}",
                idx + 1,
                point.lat,
                point.lng,
                prec = decimals
            )
        })
        .collect()
}
