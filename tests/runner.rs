extern crate crossbeam;
extern crate juliaset;

use crossbeam::channel::{bounded, unbounded};
use juliaset::{generate, GeneratorConfig, JuliaError, Outcome, Runner};
use std::time::Duration;

const PATIENCE: Duration = Duration::from_secs(30);

fn config() -> GeneratorConfig {
    GeneratorConfig::new(32, 24, -0.7, 0.27015, 100)
}

#[test]
fn delivers_the_same_image_as_a_direct_call() {
    let (runner, outcomes) = Runner::with_channel();
    assert_eq!(runner.last_duration_ms(), None);

    runner.start(&config()).unwrap();
    let rendered = outcomes.recv_timeout(PATIENCE).unwrap().unwrap();
    assert_eq!(*rendered.image, generate(&config()).unwrap());

    runner.wait();
    assert!(!runner.is_running());
    assert_eq!(runner.last_duration_ms(), Some(rendered.duration_ms));
}

#[test]
fn second_start_is_refused_while_the_first_is_outstanding() {
    let (outcome_tx, outcome_rx) = unbounded::<Outcome>();
    let (release_tx, release_rx) = bounded::<()>(0);
    let runner = Runner::new(move |outcome| {
        outcome_tx.send(outcome).unwrap();
        // Hold the job open until the test lets go.
        let _ = release_rx.recv();
    });

    let first = config();
    runner.start(&first).unwrap();
    assert!(runner.is_running());

    let mut other = first;
    other.set_c_real(0.285).set_c_imag(0.01);
    assert_eq!(runner.start(&other), Err(JuliaError::AlreadyRunning));

    let rendered = outcome_rx.recv_timeout(PATIENCE).unwrap().unwrap();
    assert_eq!(runner.start(&other), Err(JuliaError::AlreadyRunning));
    release_tx.send(()).unwrap();

    assert_eq!(*rendered.image, generate(&first).unwrap());
    runner.wait();
    assert!(outcome_rx.try_recv().is_err());

    runner.start(&other).unwrap();
    let rendered = outcome_rx.recv_timeout(PATIENCE).unwrap().unwrap();
    release_tx.send(()).unwrap();
    assert_eq!(*rendered.image, generate(&other).unwrap());
    runner.wait();
}

#[test]
fn edits_after_start_do_not_reach_the_running_job() {
    let (runner, outcomes) = Runner::with_channel();
    let mut live = config();
    let snapshot = live;
    runner.start(&live).unwrap();
    live.set_width(5).set_height(5).set_zoom(3.0);

    let rendered = outcomes.recv_timeout(PATIENCE).unwrap().unwrap();
    assert_eq!(rendered.image.width(), 32);
    assert_eq!(rendered.image.height(), 24);
    assert_eq!(*rendered.image, generate(&snapshot).unwrap());
    runner.wait();
}

#[test]
fn invalid_configuration_is_reported_asynchronously() {
    let (runner, outcomes) = Runner::with_channel();
    let mut bad = config();
    bad.set_height(0);

    assert!(runner.start(&bad).is_ok());
    match outcomes.recv_timeout(PATIENCE).unwrap() {
        Err(JuliaError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {:?}", other),
    }
    runner.wait();
    assert_eq!(runner.last_duration_ms(), None);

    runner.start(&config()).unwrap();
    assert!(outcomes.recv_timeout(PATIENCE).unwrap().is_ok());
    runner.wait();
    assert!(runner.last_duration_ms().is_some());
}
