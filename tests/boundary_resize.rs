mod support;

use pretty_assertions::assert_eq;
use support::{task, Harness, VIEWPORT};
use taskgpt::{BodyShape, Color, HostConfig, Point, Viewport, WallSide, WALL_THICKNESS};

const SIZES: [(f32, f32); 6] = [
    (1.0, 1.0),
    (320.0, 480.0),
    (800.0, 600.0),
    (1024.0, 768.0),
    (2560.0, 1440.0),
    (3840.0, 400.0),
];

fn assert_walls_fit(harness: &Harness, viewport: Viewport) {
    let boundary = harness.host.boundary();
    assert_eq!(boundary.viewport(), viewport);
    for geometry in boundary.geometry() {
        let (inner, outer) = match geometry.side {
            WallSide::Top => (0.0, -WALL_THICKNESS),
            WallSide::Bottom => (viewport.height, viewport.height + WALL_THICKNESS),
            WallSide::Left => (0.0, -WALL_THICKNESS),
            WallSide::Right => (viewport.width, viewport.width + WALL_THICKNESS),
        };
        assert_eq!(geometry.inner_edge(), inner, "{:?} at {viewport:?}", geometry.side);
        assert_eq!(geometry.outer_edge(), outer, "{:?} at {viewport:?}", geometry.side);
    }

    let world = harness.host.world();
    for (side, key) in boundary.walls() {
        let geometry = boundary
            .geometry()
            .into_iter()
            .find(|geometry| geometry.side == side)
            .expect("geometry for every side");
        assert_eq!(world.position(key), Some(geometry.center));
        assert_eq!(
            world.shape(key),
            Some(BodyShape::Rect {
                half_width: geometry.half_width,
                half_height: geometry.half_height,
            })
        );
    }
}

#[test]
fn walls_enclose_the_initial_viewport() {
    let harness = Harness::new(VIEWPORT, HostConfig::default());

    assert_walls_fit(&harness, VIEWPORT);
    assert_eq!(harness.host.world().len(), 4);
    assert!(harness
        .host
        .world()
        .bodies_at(VIEWPORT.center())
        .is_empty());
}

#[test]
fn surface_resize_refits_walls_on_next_frame() {
    let mut harness = Harness::started(VIEWPORT, HostConfig::default());
    let walls = harness.host.boundary().walls();

    for (width, height) in SIZES {
        let viewport = Viewport::new(width, height);
        assert!(harness.controller.resize(viewport));
        harness.host.run_frame();

        assert_eq!(harness.host.viewport(), viewport);
        assert_eq!(harness.controller.viewport(), viewport);
        assert_eq!(harness.host.boundary().walls(), walls);
        assert_walls_fit(&harness, viewport);
        assert_eq!(harness.host.world().len(), 4);
    }
}

#[test]
fn wall_faces_sit_on_viewport_edges() {
    let mut harness = Harness::started(VIEWPORT, HostConfig::default());
    let viewport = Viewport::new(1000.0, 700.0);
    harness.host.resize(viewport);

    let boundary = harness.host.boundary();
    let world = harness.host.world();
    let key = |side| {
        boundary
            .walls()
            .into_iter()
            .find(|(wall, _)| *wall == side)
            .map(|(_, key)| key)
            .expect("wall for side")
    };

    for (inside, outside, side) in [
        (Point::new(500.0, 1.0), Point::new(500.0, -1.0), WallSide::Top),
        (Point::new(500.0, 699.0), Point::new(500.0, 701.0), WallSide::Bottom),
        (Point::new(1.0, 350.0), Point::new(-1.0, 350.0), WallSide::Left),
        (Point::new(999.0, 350.0), Point::new(1001.0, 350.0), WallSide::Right),
    ] {
        assert!(world.bodies_at(inside).is_empty(), "{side:?} inside");
        assert_eq!(world.bodies_at(outside), vec![key(side)], "{side:?} outside");
    }

    // Corners are covered by the overhang.
    assert!(!world.bodies_at(Point::new(-5.0, -5.0)).is_empty());
    assert!(!world.bodies_at(Point::new(1005.0, 705.0)).is_empty());
}

#[test]
fn resize_before_start_is_not_delivered() {
    let harness = Harness::new(VIEWPORT, HostConfig::default());
    assert!(!harness.controller.resize(Viewport::new(10.0, 10.0)));
    assert_walls_fit(&harness, VIEWPORT);
}

#[test]
fn falling_bodies_stay_inside_after_shrinking() {
    let mut harness = Harness::started(VIEWPORT, HostConfig::default());
    let spawned = harness
        .host
        .spawn_task(
            task("Swim", Color::rgb(0, 0x80, 0xff), 20.0, 3),
            Some(Point::new(200.0, 100.0)),
        );

    let viewport = Viewport::new(400.0, 300.0);
    assert!(harness.controller.resize(viewport));
    for _ in 0..240 {
        harness.host.run_frame();
    }

    let world = harness.host.world();
    for key in spawned.bodies {
        let position = world.position(key).expect("body position");
        assert!(
            position.y <= viewport.height,
            "body below floor: {position:?}"
        );
        assert!(position.y > 0.0, "body above ceiling: {position:?}");
        assert!(
            (0.0..=viewport.width).contains(&position.x),
            "body outside side walls: {position:?}"
        );
    }
}

#[test]
fn fractional_viewports_are_snapped_to_whole_pixels() {
    let mut harness = Harness::started(VIEWPORT, HostConfig::default());

    assert!(harness.controller.resize(Viewport::new(333.3, 777.7)));
    harness.host.run_frame();

    let snapped = Viewport::new(333.0, 778.0);
    assert_eq!(harness.host.viewport(), snapped);
    assert_eq!(harness.controller.viewport(), snapped);
    assert_walls_fit(&harness, snapped);
}

#[test]
fn initial_fractional_viewport_is_snapped() {
    let harness = Harness::new(Viewport::new(640.4, 480.6), HostConfig::default());

    let snapped = Viewport::new(640.0, 481.0);
    assert_eq!(harness.host.viewport(), snapped);
    assert_walls_fit(&harness, snapped);
}
