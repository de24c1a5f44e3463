use std::time::{Duration, Instant};

use chart_axes::updater::UpdateTicket;
use chart_axes::{ChartConfig, ChartCore, DrawArea, Series, SeriesKind, UpdateScheduler};

const WINDOW: Duration = Duration::from_millis(10);

#[test]
fn test_requests_coalesce_into_one_cycle() {
    let scheduler = UpdateScheduler::new(WINDOW);
    let t0 = Instant::now();

    scheduler.request_update(t0);
    scheduler.request_update(t0 + Duration::from_millis(3));
    scheduler.request_update(t0 + Duration::from_millis(8));

    // The window opened by the first request is not extended
    assert_eq!(scheduler.next_deadline(), Some(t0 + WINDOW));
    assert!(scheduler.poll(t0 + Duration::from_millis(9)).is_none());

    let ticket = scheduler.poll(t0 + WINDOW).unwrap();
    assert_eq!(
        ticket,
        UpdateTicket {
            restart: false,
            coalesced: 3
        }
    );
    assert!(!scheduler.is_dirty());
    assert!(scheduler.is_in_flight());

    scheduler.finish(t0 + WINDOW);
    assert!(scheduler.poll(t0 + WINDOW * 5).is_none());
}

#[test]
fn test_request_during_cycle_runs_exactly_once_more() {
    let scheduler = UpdateScheduler::new(WINDOW);
    let t0 = Instant::now();

    scheduler.request_update(t0);
    assert!(scheduler.poll(t0 + WINDOW).is_some());

    // Arrives while the cycle runs
    scheduler.request_update(t0 + WINDOW);
    scheduler.request_update(t0 + WINDOW);
    assert!(scheduler.poll(t0 + WINDOW * 3).is_none());

    let done = t0 + WINDOW * 4;
    scheduler.finish(done);
    assert!(scheduler.poll(done).is_none());

    let ticket = scheduler.poll(done + WINDOW).unwrap();
    assert_eq!(ticket.coalesced, 2);
    scheduler.finish(done + WINDOW);

    assert!(scheduler.poll(done + WINDOW * 10).is_none());
}

#[test]
fn test_restart_is_sticky_until_served() {
    let scheduler = UpdateScheduler::new(WINDOW);
    let t0 = Instant::now();

    scheduler.request_restart(t0);
    scheduler.request_update(t0);
    let ticket = scheduler.poll(t0 + WINDOW).unwrap();
    assert!(ticket.restart);
    scheduler.finish(t0 + WINDOW);

    scheduler.request_update(t0 + WINDOW);
    let ticket = scheduler.poll(t0 + WINDOW * 2).unwrap();
    assert!(!ticket.restart);
}

#[test]
fn test_cancel_drops_pending_work() {
    let scheduler = UpdateScheduler::new(WINDOW);
    let t0 = Instant::now();

    scheduler.request_update(t0);
    scheduler.cancel();
    assert!(!scheduler.is_dirty());
    assert_eq!(scheduler.next_deadline(), None);
    assert!(scheduler.poll(t0 + WINDOW).is_none());
}

#[test]
fn test_clones_share_state() {
    let scheduler = UpdateScheduler::new(WINDOW);
    let producer = scheduler.clone();
    let t0 = Instant::now();

    let handle = std::thread::spawn(move || {
        for _ in 0..100 {
            producer.request_update(t0);
        }
    });
    handle.join().unwrap();

    let ticket = scheduler.poll(t0 + WINDOW).unwrap();
    assert_eq!(ticket.coalesced, 100);
}

#[test]
fn test_debounce_follows_config() {
    let config = ChartConfig {
        debounce_ms: 250,
        ..ChartConfig::default()
    };
    assert_eq!(
        UpdateScheduler::from_config(&config).debounce(),
        Duration::from_millis(250)
    );

    // Without animations there is nothing worth waiting for
    let config = ChartConfig {
        debounce_ms: 250,
        animations_enabled: false,
        ..ChartConfig::default()
    };
    assert_eq!(
        UpdateScheduler::from_config(&config).debounce(),
        Duration::from_millis(10)
    );
}

#[test]
fn test_run_drives_the_chart() {
    let mut chart = ChartCore::new(ChartConfig::default());
    chart
        .set_draw_area(DrawArea::new(0.0, 0.0, 400.0, 300.0))
        .unwrap();
    chart.push_series(Series::from_values("s", SeriesKind::Line, &[0.0, 40.0]));

    let scheduler = UpdateScheduler::from_config(chart.config());
    let t0 = Instant::now();
    assert!(scheduler.run(&mut chart, t0).unwrap().is_none());

    scheduler.request_update(t0);
    let frame = scheduler
        .run(&mut chart, t0 + scheduler.debounce())
        .unwrap()
        .unwrap();
    assert!(!frame.axes.is_empty());
    assert!(!scheduler.is_in_flight());
    assert!(!chart.axis(chart_axes::AxisOrientation::Y, 0).unwrap().separators().is_empty());

    scheduler.request_restart(t0);
    let deadline = scheduler.next_deadline().unwrap();
    let frame = scheduler.run(&mut chart, deadline).unwrap().unwrap();
    assert!(frame
        .axis(chart_axes::AxisOrientation::Y, 0)
        .unwrap()
        .transitions
        .iter()
        .all(|t| t.kind == chart_axes::TransitionKind::Place));
}
