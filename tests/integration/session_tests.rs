//! Full session runs: scripted operator input, real worker threads.

use std::sync::Arc;
use std::time::Duration;

use daqloop::acquisition::AcquisitionController;
use daqloop::adapters::console::ScriptedBytes;
use daqloop::config::SystemConfig;
use daqloop::drivers::hw_timer::ThreadTicker;
use daqloop::drivers::indicator::SimLed;
use daqloop::events::Signals;
use daqloop::session::Session;
use daqloop::store::SharedStore;

use crate::mock_hw::{CountingSensor, GatedBytes, ManualTicks, TickCall};

fn quiet() -> SystemConfig {
    SystemConfig {
        sampling_on_boot: false,
        show_banner: false,
        ..SystemConfig::default()
    }
}

fn manual_session(
    config: SystemConfig,
    values: &[f32],
) -> (
    Session<5, ManualTicks, SimLed>,
    Arc<SharedStore<5>>,
    ManualTicks,
) {
    let ticks = ManualTicks::new();
    let store = Arc::new(SharedStore::<5>::new());
    for &v in values {
        store.insert(v);
    }
    let acquisition = Arc::new(AcquisitionController::new(
        config.sample_period(),
        ticks.clone(),
        SimLed::new("idle"),
        SimLed::new("activity"),
    ));
    let session = Session::new(
        config,
        Arc::new(Signals::new()),
        Arc::clone(&store),
        acquisition,
    );
    (session, store, ticks)
}

#[test]
fn boot_banner_and_sampling_follow_config() {
    let (session, _, ticks) = manual_session(SystemConfig::default(), &[]);
    let out = session
        .run(CountingSensor::default(), ScriptedBytes::new(""), String::new())
        .unwrap();
    assert_eq!(
        out,
        "\r\nValid commands you can use are: print (n), delete(n), sampling(on/off)\r\n-> "
    );
    assert_eq!(
        ticks.history(),
        vec![TickCall::Arm(Duration::from_millis(100)), TickCall::Disarm]
    );
}

#[test]
fn scripted_console_session() {
    let (session, store, _) = manual_session(quiet(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let out = session
        .run(
            CountingSensor::default(),
            ScriptedBytes::new("print 2\rdelete 2\rn\rdelete 2\ry\rprint 9\r"),
            String::new(),
        )
        .unwrap();
    assert_eq!(
        out,
        "-> \r\n\
         Sample 1 from oldest: 2.000000\r\n\
         Sample 2 from oldest: 3.000000\r\n\
         2 samples printed; running average of the buffer is 4.000000\r\n\
         -> \r\n\
         Are you sure you want to delete 2 records? (y/n)\r\n-> \r\n\
         Operation cancelled\r\n\
         -> \r\n\
         Are you sure you want to delete 2 records? (y/n)\r\n-> \r\n\
         2 samples from oldest were deleted\r\n\
         -> \r\n\
         Invalid input - usage: print(n) where 5 >= n > 0\r\n\
         -> "
    );
    let stats = store.stats();
    assert_eq!(stats.count, 3);
    assert!((stats.average - 5.0).abs() < 1e-9);
}

const CONFIRM_FLOW: &str = "-> \r\n\
     Are you sure you want to delete 2 records? (y/n)\r\n-> \r\n\
     Operation cancelled\r\n\
     -> \r\n\
     Are you sure you want to delete 2 records? (y/n)\r\n-> \r\n\
     2 samples from oldest were deleted\r\n\
     -> \r\n\
     Sample 1 from oldest: 3.000000\r\n\
     1 samples printed; running average of the buffer is 3.000000\r\n\
     -> ";

#[test]
fn crlf_terminal_confirmation_flow() {
    let (session, store, _) = manual_session(quiet(), &[1.0, 2.0, 3.0]);
    let out = session
        .run(
            CountingSensor::default(),
            ScriptedBytes::new("delete 2\r\nn\r\ndelete 2\r\ny\r\nprint 1\r\n"),
            String::new(),
        )
        .unwrap();
    assert_eq!(out, CONFIRM_FLOW);
    assert_eq!(store.stats().count, 1);
}

#[test]
fn lf_terminal_confirmation_flow() {
    let (session, store, _) = manual_session(quiet(), &[1.0, 2.0, 3.0]);
    let out = session
        .run(
            CountingSensor::default(),
            ScriptedBytes::new("delete 2\nn\ndelete 2\ny\nprint 1\n"),
            String::new(),
        )
        .unwrap();
    assert_eq!(out, CONFIRM_FLOW);
    assert_eq!(store.stats().count, 1);
}

#[test]
fn answer_without_enter_still_confirms() {
    let (session, store, _) = manual_session(quiet(), &[1.0, 2.0, 3.0]);
    let out = session
        .run(
            CountingSensor::default(),
            ScriptedBytes::new("delete 1\r\nyprint 1\r\n"),
            String::new(),
        )
        .unwrap();
    assert!(out.contains("1 samples from oldest were deleted\r\n"));
    assert!(out.contains("Sample 1 from oldest: 2.000000\r\n"));
    assert!(!out.contains("A valid command was not entered"));
    assert_eq!(store.stats().count, 2);
}

#[test]
fn line_editing_and_overlong_lines() {
    let (session, _, _) = manual_session(quiet(), &[]);
    // "prinx" + backspace + "t 1"; then 16 bytes, split at the line limit.
    let out = session
        .run(
            CountingSensor::default(),
            ScriptedBytes::new("prinx\x08t 1\r\nsampling offxxxx\r"),
            String::new(),
        )
        .unwrap();
    assert!(out.contains("0 samples printed; running average of the buffer is 0.000000\r\n"));
    assert!(out.contains("A valid operand was not entered. Valid operands are: on, off\r\n"));
    assert!(out.contains("A valid command was not entered. Valid commands are: "));
    assert_eq!(out.matches("-> ").count(), 4);
}

#[test]
fn ticker_driven_acquisition_fills_the_store() {
    let signals = Arc::new(Signals::new());
    let ticker = ThreadTicker::start(Arc::clone(&signals)).unwrap();
    let store = Arc::new(SharedStore::<120>::new());
    let acquisition = Arc::new(AcquisitionController::new(
        Duration::from_millis(5),
        ticker,
        SimLed::new("idle"),
        SimLed::new("activity"),
    ));
    let config = SystemConfig {
        sample_period_ms: 5,
        show_banner: false,
        ..SystemConfig::default()
    };

    let gate_store = Arc::clone(&store);
    let input = GatedBytes::new("sampling off\rprint 3\r", move || {
        gate_store.stats().count >= 3
    });
    let out = Session::new(config, signals, Arc::clone(&store), Arc::clone(&acquisition))
        .run(CountingSensor::default(), input, String::new())
        .unwrap();

    assert!(out.contains("Sampling was turned off\r\n"));
    assert!(out.contains(
        "Sample 1 from oldest: 1.000000\r\n\
         Sample 2 from oldest: 2.000000\r\n\
         Sample 3 from oldest: 3.000000\r\n"
    ));
    assert!(!acquisition.is_enabled());

    // Nothing is sampled once the session has switched acquisition off.
    let settled = store.stats().count;
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(store.stats().count, settled);
}
