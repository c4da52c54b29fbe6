//! Command dispatcher against a capacity-5 store and a mock tick source.

use std::sync::Arc;
use std::time::Duration;

use daqloop::acquisition::AcquisitionController;
use daqloop::app::commands::Command;
use daqloop::app::dispatcher::CommandDispatcher;
use daqloop::app::outcome::{Outcome, UsageVerb};
use daqloop::drivers::indicator::SimLed;
use daqloop::store::SharedStore;

use crate::mock_hw::{ManualTicks, ScriptConsole, TickCall};

struct Rig {
    store: Arc<SharedStore<5>>,
    acquisition: Arc<AcquisitionController<ManualTicks, SimLed>>,
    ticks: ManualTicks,
    dispatcher: CommandDispatcher<5, ManualTicks, SimLed>,
}

fn rig() -> Rig {
    let ticks = ManualTicks::new();
    let store = Arc::new(SharedStore::<5>::new());
    let acquisition = Arc::new(AcquisitionController::new(
        Duration::from_millis(100),
        ticks.clone(),
        SimLed::new("idle"),
        SimLed::new("activity"),
    ));
    let dispatcher = CommandDispatcher::new(Arc::clone(&store), Arc::clone(&acquisition));
    Rig {
        store,
        acquisition,
        ticks,
        dispatcher,
    }
}

fn run(rig: &mut Rig, line: &str, keys: &[u8]) -> (Outcome, String) {
    let mut console = ScriptConsole::with_keys(keys);
    let outcome = rig
        .dispatcher
        .dispatch(Command::parse(line.as_bytes()), &mut console)
        .unwrap();
    (outcome, console.out)
}

#[test]
fn walkthrough_insert_print_evict() {
    let mut rig = rig();
    for v in [1.0, 2.0, 3.0] {
        rig.store.insert(v);
    }
    let (outcome, out) = run(&mut rig, "print 3", &[]);
    assert_eq!(
        out,
        "Sample 1 from oldest: 1.000000\r\n\
         Sample 2 from oldest: 2.000000\r\n\
         Sample 3 from oldest: 3.000000\r\n"
    );
    assert_eq!(
        outcome.to_string(),
        "3 samples printed; running average of the buffer is 2.000000"
    );

    for v in [4.0, 5.0, 6.0] {
        rig.store.insert(v);
    }
    let (outcome, out) = run(&mut rig, "print 5", &[]);
    assert!(out.starts_with("Sample 1 from oldest: 2.000000\r\n"));
    assert!(out.ends_with("Sample 5 from oldest: 6.000000\r\n"));
    assert_eq!(
        outcome,
        Outcome::Printed {
            shown: 5,
            average: 4.0
        }
    );

    let (outcome, out) = run(&mut rig, "delete 2", b"y");
    assert_eq!(out, "Are you sure you want to delete 2 records? (y/n)\r\n-> \r\n");
    assert_eq!(outcome.to_string(), "2 samples from oldest were deleted");

    let (outcome, out) = run(&mut rig, "print 3", &[]);
    assert_eq!(
        out,
        "Sample 1 from oldest: 4.000000\r\n\
         Sample 2 from oldest: 5.000000\r\n\
         Sample 3 from oldest: 6.000000\r\n"
    );
    assert_eq!(
        outcome,
        Outcome::Printed {
            shown: 3,
            average: 5.0
        }
    );
}

#[test]
fn print_more_than_stored_clamps_with_notice() {
    let mut rig = rig();
    for v in [1.0, 2.0, 3.0] {
        rig.store.insert(v);
    }
    let (outcome, out) = run(&mut rig, "print 5", &[]);
    assert!(out.starts_with(
        "You specified a number higher than the current length of the buffer. \
         There are currently only 3 samples in the buffer; 3 samples will be printed\r\n"
    ));
    assert_eq!(out.lines().count(), 4);
    assert!(matches!(outcome, Outcome::Printed { shown: 3, .. }));
}

#[test]
fn declined_delete_is_cancelled_without_mutation() {
    let mut rig = rig();
    for v in [1.0, 2.0, 3.0] {
        rig.store.insert(v);
    }
    let (outcome, _) = run(&mut rig, "delete 2", b"n");
    assert_eq!(outcome.to_string(), "Operation cancelled");
    let stats = rig.store.stats();
    assert_eq!(stats.count, 3);
    assert!((stats.average - 2.0).abs() < 1e-9);
}

#[test]
fn operands_outside_capacity_cite_usage() {
    let mut rig = rig();
    rig.store.insert(1.0);
    let (outcome, out) = run(&mut rig, "print 6", &[]);
    assert!(out.is_empty());
    assert_eq!(
        outcome.to_string(),
        "Invalid input - usage: print(n) where 5 >= n > 0"
    );

    let (outcome, out) = run(&mut rig, "delete abc", b"y");
    assert!(out.is_empty());
    assert_eq!(
        outcome,
        Outcome::InvalidUsage {
            verb: UsageVerb::Delete,
            capacity: 5
        }
    );
    assert_eq!(rig.store.stats().count, 1);
}

#[test]
fn sampling_toggles_drive_the_tick_source_once_each() {
    let mut rig = rig();
    assert_eq!(run(&mut rig, "sampling on", &[]).0.to_string(), "Sampling was turned on");
    assert_eq!(
        run(&mut rig, "sampling on", &[]).0.to_string(),
        "Sampling was already on - no change has been made"
    );
    assert!(rig.acquisition.is_enabled());
    assert_eq!(run(&mut rig, "sampling off", &[]).0.to_string(), "Sampling was turned off");
    assert_eq!(
        run(&mut rig, "sampling off", &[]).0.to_string(),
        "Sampling was already off - no change has been made"
    );
    assert_eq!(
        rig.ticks.history(),
        vec![TickCall::Arm(Duration::from_millis(100)), TickCall::Disarm]
    );
}

#[test]
fn unrecognised_input_reports_valid_choices() {
    let mut rig = rig();
    assert_eq!(
        run(&mut rig, "sampling maybe", &[]).0.to_string(),
        "A valid operand was not entered. Valid operands are: on, off"
    );
    assert_eq!(
        run(&mut rig, "erase 3", &[]).0.to_string(),
        "A valid command was not entered. Valid commands are: \
         print (n), delete(n), sampling(on/off)"
    );
    assert!(rig.ticks.history().is_empty());
}
