//! The event assembler state machine.
//!
//! ```text
//!            BEGIN:VEVENT (restart)
//!              ┌──────┐
//!              ▼      │
//!   Idle ──BEGIN:VEVENT──▶ InEvent ──END:VEVENT──▶ Idle (event emitted)
//!                           │  ▲
//!                           └──┘ SUMMARY / ATTENDEE / DTSTART / DTEND
//! ```
//!
//! Every other line leaves the state untouched.

use icsfeed_core::{Event, EventBuilder};
use tracing::debug;

use crate::datetime::parse_timestamp;
use crate::diagnostics::Diagnostics;
use crate::error::ParseError;
use crate::property::{ContentLine, PropertyKind};
use crate::unfold::RawCapture;

/// The component name that opens and closes an event block.
const VEVENT: &str = "VEVENT";

/// Where the assembler is in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssemblerState {
    /// Outside any event block.
    #[default]
    Idle,
    /// Inside an event block, accumulating fields.
    InEvent(EventBuilder),
}

/// Builds events from content lines.
pub struct Assembler<'d> {
    state: AssemblerState,
    events: Vec<Event>,
    diagnostics: &'d dyn Diagnostics,
}

impl<'d> Assembler<'d> {
    /// Creates an idle assembler reporting to `diagnostics`.
    pub fn new(diagnostics: &'d dyn Diagnostics) -> Self {
        Self {
            state: AssemblerState::Idle,
            events: Vec::new(),
            diagnostics,
        }
    }

    /// The current state.
    pub fn state(&self) -> &AssemblerState {
        &self.state
    }

    /// Returns true when no event block is open.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, AssemblerState::Idle)
    }

    /// Events finished so far, in input order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the assembler, returning the finished events in input order.
    ///
    /// A block that is still open is dropped.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Applies one content line.
    ///
    /// `capture` holds the physical lines read so far. It is restarted on
    /// `BEGIN:VEVENT` and snapshotted into the event on `END:VEVENT`.
    ///
    /// # Errors
    ///
    /// Fails only when a `DTSTART`/`DTEND` value cannot be parsed. Events
    /// finished before the error stay available through [`Self::events`].
    pub fn feed(
        &mut self,
        line: &ContentLine<'_>,
        capture: &mut RawCapture,
    ) -> Result<(), ParseError> {
        match line.kind {
            PropertyKind::Begin if line.value == VEVENT => {
                if !self.is_idle() {
                    debug!("Nested BEGIN:VEVENT, discarding open event");
                }
                self.state = AssemblerState::InEvent(EventBuilder::new());
                capture.restart();
            }
            PropertyKind::End if line.value == VEVENT => {
                if let AssemblerState::InEvent(builder) = std::mem::take(&mut self.state) {
                    let event = builder.finish(capture.snapshot());
                    debug!(
                        summary = event.summary(),
                        start = %event.start(),
                        "Assembled event"
                    );
                    self.events.push(event);
                }
            }
            kind => {
                if let AssemblerState::InEvent(builder) = &mut self.state {
                    apply_field(builder, kind, line, self.diagnostics)?;
                }
            }
        }
        Ok(())
    }
}

fn apply_field(
    builder: &mut EventBuilder,
    kind: PropertyKind,
    line: &ContentLine<'_>,
    diagnostics: &dyn Diagnostics,
) -> Result<(), ParseError> {
    match kind {
        PropertyKind::Summary => {
            builder.summary(line.value);
        }
        PropertyKind::Attendee => {
            builder.attendee(line.value);
        }
        PropertyKind::DtStart => {
            builder.start(parse_timestamp(line, diagnostics)?);
        }
        PropertyKind::DtEnd => {
            builder.end(parse_timestamp(line, diagnostics)?);
        }
        PropertyKind::Begin | PropertyKind::End | PropertyKind::Other => {}
    }
    Ok(())
}
