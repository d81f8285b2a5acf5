//! Text visualization of a resolution.
//!
//! A read-only consumer of [`ResolutionResult`]: it never resolves
//! anything, it only lays out what the resolver recorded. Three views:
//!
//! - **Stack**: top to bottom, position badges, controller and card
//! - **Play order**: bottom to top, with targets
//! - **Resolution order**: pop order with countered / fizzled markers
//!
//! [`StackView::at_step`] highlights a single step the way a slideshow
//! would: earlier steps are marked done, the current one is marked.

use std::fmt::{self, Write};

use crate::resolver::{ResolutionResult, ResolutionStep};
use crate::stack::EntryStatus;

/// Renders a [`ResolutionResult`] as plain text.
#[derive(Clone, Copy, Debug)]
pub struct StackView<'a> {
    result: &'a ResolutionResult,
    current_step: Option<u32>,
}

impl<'a> StackView<'a> {
    /// View the whole resolution with no step highlighted.
    #[must_use]
    pub fn new(result: &'a ResolutionResult) -> Self {
        Self {
            result,
            current_step: None,
        }
    }

    /// Highlight one step. Returns `None` if the step does not exist.
    #[must_use]
    pub fn at_step(self, step_number: u32) -> Option<Self> {
        self.result.step(step_number)?;
        Some(Self {
            current_step: Some(step_number),
            ..self
        })
    }

    /// Steps ordered bottom of the stack to top.
    fn by_position(&self) -> Vec<&'a ResolutionStep> {
        let mut steps: Vec<_> = self.result.steps.iter().collect();
        steps.sort_by_key(|s| s.entry.position);
        steps
    }

    fn marker(&self, step_number: u32) -> &'static str {
        match self.current_step {
            Some(current) if step_number < current => "[x]",
            Some(current) if step_number == current => "[>]",
            _ => "[ ]",
        }
    }

    /// The stack as declared, top first.
    pub fn write_stack(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "STACK (top to bottom)")?;
        for (i, step) in self.by_position().into_iter().rev().enumerate() {
            let entry = &step.entry;
            // Popped entries show how they actually left the stack
            let state = match self.current_step {
                Some(current) if step.step_number < current => format!(" ({})", step.status()),
                Some(current) if step.step_number == current => " (resolving)".to_string(),
                _ => String::new(),
            };
            let top = if i == 0 { "  <- TOP OF STACK" } else { "" };
            writeln!(
                out,
                "  [{}] {}: {}{}{}",
                entry.position,
                entry.action.controller(),
                entry.card(),
                state,
                top
            )?;
        }
        Ok(())
    }

    /// Declaration order with targets.
    pub fn write_play_order(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "Play order:")?;
        for step in self.by_position() {
            let action = &step.entry.action;
            write!(out, "  {}. {} plays {}", step.entry.position, action.controller(), action.card())?;
            if !action.is_untargeted() {
                let targets: Vec<_> = action.targets().iter().map(|t| t.label()).collect();
                write!(out, " (target: {})", targets.join(", "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Pop order with outcome markers.
    pub fn write_resolution_order(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "Resolution order (LIFO):")?;
        for step in &self.result.steps {
            let card = step.entry.card();
            let outcome = match step.status() {
                EntryStatus::Resolved => format!("{card} resolves"),
                EntryStatus::Countered => format!("{card} is countered and does not resolve"),
                EntryStatus::Fizzled => format!("{card} fizzles"),
                EntryStatus::Pending => format!("{card} is pending"),
            };
            writeln!(out, "  {} {}. {}", self.marker(step.step_number), step.step_number, outcome)?;
            for side in &step.state_after.side_effects {
                writeln!(out, "        - {side}")?;
            }
        }
        Ok(())
    }

    /// Details of the highlighted step, if any.
    pub fn write_current_step(&self, out: &mut impl Write) -> fmt::Result {
        let Some(step) = self.current_step.and_then(|n| self.result.step(n)) else {
            return Ok(());
        };
        writeln!(out, "Step {}", step.step_number)?;
        writeln!(out, "  {}", step.description)?;
        writeln!(out, "  {}", step.state_after.summary())
    }
}

impl fmt::Display for StackView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_stack(f)?;
        writeln!(f)?;
        self.write_play_order(f)?;
        writeln!(f)?;
        self.write_resolution_order(f)?;
        if self.current_step.is_some() {
            writeln!(f)?;
            self.write_current_step(f)?;
        }
        Ok(())
    }
}

/// Render the whole resolution.
#[must_use]
pub fn render(result: &ResolutionResult) -> String {
    StackView::new(result).to_string()
}

/// Render with one step highlighted.
#[must_use]
pub fn render_step(result: &ResolutionResult, step_number: u32) -> Option<String> {
    StackView::new(result).at_step(step_number).map(|v| v.to_string())
}
