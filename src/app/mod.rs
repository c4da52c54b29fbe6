//! Application core: command interpretation and dispatch, zero I/O.
//!
//! Keystrokes are composed into a line by [`line::LineEditor`], parsed
//! into a [`commands::Command`], and executed by
//! [`dispatcher::CommandDispatcher`], which reports one
//! [`outcome::Outcome`] per command.  All interaction with the console,
//! sensor and timer happens through the traits in [`ports`].

pub mod commands;
pub mod dispatcher;
pub mod line;
pub mod outcome;
pub mod ports;
