//! Integration tests for the async PollingController.
//!
//! These drive the real executor, reactor timers and StatusClient deadline
//! with mock ports, using a short poll interval so each test finishes in
//! well under a second.

use std::time::Duration;

use edge_executor::LocalExecutor;
use futures_lite::future;
use soundbot_link::app::events::LinkEvent;
use soundbot_link::config::PollConfig;
use soundbot_link::display::DisplayKind;
use soundbot_link::error::NetworkError;
use soundbot_link::poller::PollingController;

use crate::mock_ports::{OK_BODY, RecordingSink, Reply, ScriptedTransport, SharedSsid};

type Controller = PollingController<SharedSsid, ScriptedTransport, RecordingSink>;

fn fast_config() -> PollConfig {
    PollConfig {
        poll_interval_ms: 5,
        request_timeout_ms: 40,
        ..PollConfig::default()
    }
}

fn make(ssid: &SharedSsid, transport: &ScriptedTransport) -> Controller {
    PollingController::new(
        &fast_config(),
        ssid.clone(),
        transport.clone(),
        RecordingSink::new(),
    )
    .unwrap()
}

/// Yield to the reactor until `cond` holds, failing after ~2 s.
async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        async_io_mini::Timer::after(Duration::from_millis(2)).await;
    }
    panic!("condition not reached in time");
}

async fn sleep_ms(ms: u64) {
    async_io_mini::Timer::after(Duration::from_millis(ms)).await;
}

#[test]
fn invalid_config_is_refused() {
    let config = PollConfig {
        error_threshold: 0,
        ..PollConfig::default()
    };
    let result = PollingController::new(
        &config,
        SharedSsid::off(),
        ScriptedTransport::always(Reply::Body(OK_BODY.to_vec())),
        RecordingSink::new(),
    );
    assert!(result.is_err());
}

#[test]
fn off_network_emits_reset_and_never_fetches() {
    let ssid = SharedSsid::on("HomeNetwork");
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 3)).await;
        controller.stop();
    }));

    assert_eq!(transport.calls(), 0);
    controller.with_sink(|s| {
        assert!(s.states.iter().all(|st| st.is_reset()));
        assert!(s.events.is_empty());
    });
}

#[test]
fn on_network_shows_live_data() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 2)).await;
        controller.stop();
    }));

    controller.with_sink(|s| {
        let live = s.last_state().unwrap();
        assert_eq!(live.kind, DisplayKind::Live);
        assert_eq!(live.sound_text, "55.0 dB");
        assert_eq!(
            s.events[0],
            LinkEvent::Connected {
                ssid: "SoundBot-AP".into()
            }
        );
        // Level stays at 2, so exactly one haptic no matter how many ticks ran.
        assert_eq!(
            s.count_events(|e| matches!(e, LinkEvent::Haptic { level: 2 })),
            1
        );
    });
    assert_eq!(controller.context().consecutive_errors, 0);
}

#[test]
fn one_request_per_tick() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 5)).await;
        controller.stop();
    }));

    let ticks = controller.context().ticks;
    assert_eq!(u64::from(transport.calls()), ticks);
    controller.with_sink(|s| assert_eq!(s.states.len() as u64, ticks));
}

#[test]
fn restart_replaces_the_running_chain() {
    let ssid = SharedSsid::off();
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        controller.start(&executor);
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 6)).await;
        controller.stop();
    }));

    // One chain means exactly one reset per tick of the surviving session.
    let ticks = controller.context().ticks;
    controller.with_sink(|s| assert_eq!(s.states.len() as u64, ticks));
    assert!(!controller.is_polling());
}

#[test]
fn stop_halts_emission() {
    let ssid = SharedSsid::off();
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    let (at_stop, later) = future::block_on(executor.run(async {
        controller.start(&executor);
        assert!(controller.is_polling());
        wait_until(|| controller.with_sink(|s| s.states.len() >= 2)).await;
        controller.stop();
        let at_stop = controller.with_sink(|s| s.states.len());
        sleep_ms(40).await;
        (at_stop, controller.with_sink(|s| s.states.len()))
    }));

    assert_eq!(at_stop, later);
    assert!(!controller.is_polling());
}

#[test]
fn stop_during_hung_fetch_emits_nothing_more() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let transport = ScriptedTransport::always(Reply::Hang);
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    let emitted = future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| transport.calls() >= 1).await;
        controller.stop();
        sleep_ms(80).await;
        controller.with_sink(|s| s.states.len())
    }));

    // Stopped before the 40 ms deadline: no retrying state ever surfaces.
    assert_eq!(emitted, 0);
}

#[test]
fn hung_request_times_out_into_retrying() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let transport = ScriptedTransport::always(Reply::Hang);
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| !s.states.is_empty())).await;
        controller.stop();
    }));

    controller.with_sink(|s| {
        assert_eq!(s.states[0].kind, DisplayKind::Retrying { attempt: 1 });
    });
}

#[test]
fn sustained_failure_degrades_once() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let transport = ScriptedTransport::always(Reply::Fail(NetworkError::ConnectFailed));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 8)).await;
        controller.stop();
    }));

    controller.with_sink(|s| {
        assert_eq!(s.issues_events(), 1);
        assert!(s.states[..4].iter().all(|st| !st.is_reset()));
        assert!(s.states[4..].iter().all(|st| st.is_reset()));
    });
}

#[test]
fn disconnect_mid_fetch_keeps_reset_on_screen() {
    let ssid = SharedSsid::on("SoundBot-AP");
    let dropper = ssid.clone();
    // The AP disappears while the request is in flight.
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()))
        .on_request(move || dropper.set(None));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 2)).await;
        controller.stop();
    }));

    assert_eq!(transport.calls(), 1);
    controller.with_sink(|s| {
        assert!(s.states.iter().all(|st| st.is_reset()));
        assert_eq!(
            s.events,
            vec![
                LinkEvent::Connected {
                    ssid: "SoundBot-AP".into()
                },
                LinkEvent::Disconnected,
            ]
        );
    });
}

#[test]
fn reconnect_resumes_fetching() {
    let ssid = SharedSsid::off();
    let transport = ScriptedTransport::always(Reply::Body(OK_BODY.to_vec()));
    let mut controller = make(&ssid, &transport);
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    future::block_on(executor.run(async {
        controller.start(&executor);
        wait_until(|| controller.with_sink(|s| s.states.len() >= 2)).await;
        ssid.set(Some("SoundBot-AP"));
        wait_until(|| {
            controller.with_sink(|s| s.last_state().is_some_and(|st| st.kind == DisplayKind::Live))
        })
        .await;
        controller.stop();
    }));

    assert!(transport.calls() >= 1);
    controller.with_sink(|s| {
        assert_eq!(
            s.count_events(|e| matches!(e, LinkEvent::Connected { .. })),
            1
        );
    });
}
