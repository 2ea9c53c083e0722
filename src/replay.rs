//! Replays rectangle gestures through a full attach / draw / detach cycle.

use crate::config::Config;
use crate::controller::{ControllerOptions, DrawController};
use crate::geo::{GeoError, Point};
use crate::presenter::ResultPresenter;
use crate::surface::MemorySurface;
use anyhow::{Context, Result};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// A completed rectangle drag between two map points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Error)]
pub enum GestureParseError {
    #[error("expected LAT1,LNG1,LAT2,LNG2, got {0} value(s)")]
    WrongArity(usize),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error(transparent)]
    Coordinate(#[from] GeoError),
}

impl FromStr for Gesture {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| GestureParseError::NotANumber(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let &[lat1, lng1, lat2, lng2] = values.as_slice() else {
            return Err(GestureParseError::WrongArity(values.len()));
        };

        Ok(Self {
            start: Point::new(lat1, lng1)?,
            end: Point::new(lat2, lng2)?,
        })
    }
}

/// Attaches a controller to an in-memory map built from `config`, draws every
/// gesture in order, detaches, and returns the presenter as the user would
/// last have seen it.
pub fn replay(config: &Config, gestures: &[Gesture]) -> Result<ResultPresenter> {
    let surface = Rc::new(
        MemorySurface::from_config(&config.map).context("Invalid map center in config")?,
    );
    let presenter = Rc::new(RefCell::new(ResultPresenter::new(config.presenter.clone())));

    let mut controller = DrawController::new(ControllerOptions::from_config(&config.draw));
    let sink = Rc::clone(&presenter);
    let handle = controller
        .attach(Rc::clone(&surface), move |coords| sink.borrow_mut().show(coords))
        .context("Failed to attach draw controller")?;

    for gesture in gestures {
        surface
            .draw_rectangle(gesture.start, gesture.end)
            .context("Failed to draw rectangle")?;
    }

    handle.detach();
    info!("Replayed {} gesture(s)", gestures.len());

    let result = presenter.borrow().clone();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_numbers() {
        let gesture: Gesture = " 10.0, 20.0 ,10.5,20.5".parse().unwrap();
        assert_eq!(gesture.start, Point::new(10.0, 20.0).unwrap());
        assert_eq!(gesture.end, Point::new(10.5, 20.5).unwrap());
    }

    #[test]
    fn rejects_wrong_arity_and_garbage() {
        assert!(matches!(
            "1,2,3".parse::<Gesture>(),
            Err(GestureParseError::WrongArity(3))
        ));
        assert!(matches!(
            "1,2,x,4".parse::<Gesture>(),
            Err(GestureParseError::NotANumber(_))
        ));
        assert!(matches!(
            "95,0,1,1".parse::<Gesture>(),
            Err(GestureParseError::Coordinate(GeoError::LatitudeOutOfRange(_)))
        ));
    }

    #[test]
    fn replay_keeps_last_rectangle() {
        let gestures = [
            "0,0,1,1".parse::<Gesture>().unwrap(),
            "10.0,20.0,10.5,20.5".parse::<Gesture>().unwrap(),
        ];
        let presenter = replay(&Config::default(), &gestures).unwrap();

        assert!(presenter.is_open());
        assert_eq!(
            presenter.coords().map(|c| c.to_pairs()[0]),
            Some([10.5, 20.0])
        );
    }

    #[test]
    fn degenerate_gesture_leaves_previous_result() {
        let gestures = [
            "0,0,1,1".parse::<Gesture>().unwrap(),
            "5,5,5,6".parse::<Gesture>().unwrap(),
        ];
        let presenter = replay(&Config::default(), &gestures).unwrap();
        assert_eq!(presenter.coords().map(|c| c.to_pairs()[0]), Some([1.0, 0.0]));
    }

    #[test]
    fn no_gestures_means_no_data() {
        let presenter = replay(&Config::default(), &[]).unwrap();
        assert!(!presenter.is_open());
        assert!(presenter.coords().is_none());
    }
}
