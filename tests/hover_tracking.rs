mod support;

use pretty_assertions::assert_eq;
use support::{highlighted_count, task, Harness, HoverCall};
use taskgpt::{Color, HoverOutcome, Point, PointerEvent, TOOLTIP_OFFSET};

const RED: Color = Color::rgb(0xcc, 0x22, 0x22);
const BLUE: Color = Color::rgb(0x22, 0x22, 0xcc);

#[test]
fn hovered_body_is_highlighted_and_reported_with_offset() {
    let mut harness = Harness::floating();
    let spawned = harness
        .host
        .spawn_task(task("Walk the dog", RED, 30.0, 1), Some(Point::new(200.0, 200.0)));

    harness.hover_at(Point::new(205.0, 195.0));

    assert_eq!(
        harness.hovers.last(),
        Some(HoverCall {
            task: Some("Walk the dog".to_string()),
            x: 205.0 + TOOLTIP_OFFSET,
            y: 195.0 + TOOLTIP_OFFSET,
        })
    );
    assert_eq!(harness.host.hovered(), Some(spawned.bodies[0]));
    assert_eq!(highlighted_count(&harness.frame()), 1);
    assert_eq!(
        harness.host.world().style(spawned.bodies[0]).map(|style| style.fill),
        Some(Color::HIGHLIGHT)
    );
}

#[test]
fn moving_to_another_body_restores_the_first() {
    let mut harness = Harness::floating();
    let red = harness
        .host
        .spawn_task(task("Brush teeth", RED, 20.0, 1), Some(Point::new(150.0, 300.0)));
    let blue = harness
        .host
        .spawn_task(task("Go shopping", BLUE, 20.0, 1), Some(Point::new(500.0, 300.0)));

    harness.hover_at(Point::new(150.0, 300.0));
    harness.hover_at(Point::new(500.0, 300.0));

    let world = harness.host.world();
    assert_eq!(world.style(red.bodies[0]).map(|style| style.fill), Some(RED));
    assert_eq!(
        world.style(blue.bodies[0]).map(|style| style.fill),
        Some(Color::HIGHLIGHT)
    );
    assert_eq!(highlighted_count(&harness.frame()), 1);
    assert_eq!(
        harness.hovers.last().and_then(|call| call.task),
        Some("Go shopping".to_string())
    );
}

#[test]
fn staying_on_a_body_keeps_its_original_fill_underneath() {
    let mut harness = Harness::floating();
    let spawned = harness
        .host
        .spawn_task(task("Swim", BLUE, 25.0, 1), Some(Point::new(400.0, 300.0)));

    for _ in 0..5 {
        harness.hover_at(Point::new(400.0, 300.0));
    }
    assert_eq!(highlighted_count(&harness.frame()), 1);

    harness.hover_at(Point::new(10.0, 10.0));
    assert_eq!(
        harness.host.world().style(spawned.bodies[0]).map(|style| style.fill),
        Some(BLUE)
    );
}

#[test]
fn empty_space_reports_nothing_at_origin() {
    let mut harness = Harness::floating();
    harness
        .host
        .spawn_task(task("Swim", BLUE, 25.0, 1), Some(Point::new(400.0, 300.0)));

    harness.hover_at(Point::new(400.0, 300.0));
    harness.hover_at(Point::new(700.0, 50.0));

    assert_eq!(
        harness.hovers.last(),
        Some(HoverCall {
            task: None,
            x: 0.0,
            y: 0.0,
        })
    );
    assert_eq!(harness.host.hovered(), None);
    assert_eq!(highlighted_count(&harness.frame()), 0);
}

#[test]
fn walls_are_never_hovered() {
    let mut harness = Harness::floating();

    harness.hover_at(Point::new(-5.0, 300.0));

    assert_eq!(harness.hovers.last().and_then(|call| call.task), None);
    assert_eq!(highlighted_count(&harness.frame()), 0);
}

#[test]
fn pointer_leaving_clears_the_highlight() {
    let mut harness = Harness::floating();
    let spawned = harness
        .host
        .spawn_task(task("Swim", RED, 25.0, 1), Some(Point::new(300.0, 300.0)));

    harness.hover_at(Point::new(300.0, 300.0));
    assert!(harness.controller.pointer(PointerEvent::Left));
    harness.host.run_frame();

    assert_eq!(harness.host.pointer(), None);
    assert_eq!(harness.host.hovered(), None);
    assert_eq!(
        harness.host.world().style(spawned.bodies[0]).map(|style| style.fill),
        Some(RED)
    );
    assert_eq!(harness.hovers.last().and_then(|call| call.task), None);
}

#[test]
fn hover_callback_runs_every_frame() {
    let mut harness = Harness::floating();

    harness.host.run_frame();
    harness.host.run_frame();
    harness.hover_at(Point::new(1.0, 1.0));

    assert_eq!(harness.hovers.len(), 3);
}

#[test]
fn check_hover_reports_outcome_without_stepping() {
    let mut harness = Harness::floating();
    let spawned = harness
        .host
        .spawn_task(task("Swim", RED, 25.0, 1), Some(Point::new(300.0, 300.0)));
    harness.hover_at(Point::new(310.0, 300.0));
    let steps = harness.host.world().steps();

    let outcome = harness.host.check_hover();

    assert_eq!(
        outcome,
        HoverOutcome::Task {
            task: spawned.task,
            x: 320.0,
            y: 310.0,
        }
    );
    assert_eq!(harness.host.world().steps(), steps);
    assert_eq!(highlighted_count(&harness.frame()), 1);
}

#[test]
fn stopping_restores_original_fill() {
    let mut harness = Harness::floating();
    let spawned = harness
        .host
        .spawn_task(task("Swim", RED, 25.0, 1), Some(Point::new(300.0, 300.0)));
    harness.hover_at(Point::new(300.0, 300.0));

    harness.host.stop().expect("stop host");

    assert_eq!(
        harness.host.world().style(spawned.bodies[0]).map(|style| style.fill),
        Some(RED)
    );
}
