//! Running-process detection
//!
//! Backups and restores of a live application's config folder race with the
//! application writing to it, so front ends ask whether the application is
//! running before mutating anything. The answer is a point-in-time snapshot
//! of the process table and never an error.

use log::debug;
use sysinfo::System;

/// Answers whether a named application is currently running
pub trait ProcessProbe {
    /// True when a process with this executable name (case-insensitive) exists
    fn is_running(&self, name: &str) -> bool;
}

/// Process table scanner backed by sysinfo
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessDetector;

impl ProcessDetector {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessProbe for ProcessDetector {
    fn is_running(&self, name: &str) -> bool {
        let mut system = System::new();
        system.refresh_processes();

        // An unreadable process table comes back empty, which reads as "not running".
        let running = system
            .processes()
            .values()
            .any(|process| process.name().eq_ignore_ascii_case(name));

        debug!("Process '{}' running: {}", name, running);
        running
    }
}
