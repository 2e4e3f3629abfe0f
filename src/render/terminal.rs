// src/render/terminal.rs
use super::RenderTarget;
use crate::model::StatusViewModel;
use std::io::Write;
use std::sync::Mutex;

/// Draws the status pill as a line of text on any writer.
pub struct TerminalTarget<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl TerminalTarget<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RenderTarget for TerminalTarget<W> {
    fn render(&self, vm: &StatusViewModel) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Render failures are not the widget's problem to report.
        match vm.checked_at {
            Some(at) => {
                let _ = writeln!(
                    out,
                    "[ {} ] {} ({}) at {}",
                    vm.pill.label(),
                    vm.status_text(),
                    vm.service_text(),
                    at.format("%H:%M:%S"),
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "[ {} ] {} ({})",
                    vm.pill.label(),
                    vm.status_text(),
                    vm.service_text(),
                );
            }
        }

        if let Some(error) = &vm.error {
            let _ = writeln!(out, "        {}", error);
        }

        let _ = out.flush();
    }
}
