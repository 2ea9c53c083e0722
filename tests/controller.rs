use std::cell::RefCell;
use std::rc::Rc;

use mapselect::controller::{ControllerOptions, Lifecycle};
use mapselect::draw::Shape;
use mapselect::presenter::ResultPresenter;
use mapselect::surface::MemorySurface;
use mapselect::{AreaCoordinates, DrawController, Point};

fn point(lat: f64, lng: f64) -> Point {
    Point::new(lat, lng).unwrap()
}

#[test]
fn drawn_area_reaches_presenter() {
    let surface = Rc::new(MemorySurface::new());
    let presenter = Rc::new(RefCell::new(ResultPresenter::default()));
    let mut controller = DrawController::new(ControllerOptions::default());

    let sink = Rc::clone(&presenter);
    let handle = controller
        .attach(Rc::clone(&surface), move |coords| sink.borrow_mut().show(coords))
        .unwrap();

    surface
        .draw_rectangle(point(10.0, 20.0), point(10.5, 20.5))
        .unwrap();

    let text = presenter.borrow().render();
    assert!(text.contains("1. lat: 10.500000 lng: 20.000000"));
    assert!(text.contains("2. lat: 10.500000 lng: 20.500000"));
    assert!(text.contains("3. lat: 10.000000 lng: 20.500000"));
    assert!(text.contains("4. lat: 10.000000 lng: 20.000000"));
    assert!(text.contains("5. lat: 10.500000 lng: 20.000000"));

    handle.detach();
    assert_eq!(controller.lifecycle(), Lifecycle::Detached);
}

#[test]
fn every_reported_ring_is_closed() {
    let surface = Rc::new(MemorySurface::new());
    let reports: Rc<RefCell<Vec<AreaCoordinates>>> = Rc::new(RefCell::new(Vec::new()));
    let mut controller = DrawController::new(ControllerOptions::default());

    let sink = Rc::clone(&reports);
    let handle = controller
        .attach(Rc::clone(&surface), move |coords| sink.borrow_mut().push(coords))
        .unwrap();

    for step in 0..20 {
        let base = step as f64 * 4.0 - 40.0;
        surface
            .draw_rectangle(point(base, base * 2.0), point(base + 1.5, base * 2.0 - 3.0))
            .unwrap();
    }

    let reports = reports.borrow();
    assert_eq!(reports.len(), 20);
    for ring in reports.iter() {
        let points = ring.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
        assert!(points[0].lat > points[2].lat);
        assert!(points[1].lng > points[0].lng);
    }
    assert_eq!(surface.overlay_shapes().len(), 1);

    handle.detach();
}

#[test]
fn no_callback_after_detach_for_queued_event() {
    let surface = Rc::new(MemorySurface::new());
    let calls = Rc::new(RefCell::new(0usize));
    let mut controller = DrawController::new(ControllerOptions::default());

    let counter = Rc::clone(&calls);
    let handle = controller
        .attach(Rc::clone(&surface), move |_| *counter.borrow_mut() += 1)
        .unwrap();

    surface.queue_shape_created(Shape::rectangle(point(0.0, 0.0), point(1.0, 1.0)));
    handle.detach();
    handle.detach();
    surface.dispatch_queued();

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(surface.teardown_stats().tools_removed, 1);
    assert_eq!(surface.teardown_stats().overlays_removed, 1);
}
