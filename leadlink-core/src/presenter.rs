//! Display presenter
//!
//! Turns link and lead state into fixed-width lines for the 20x4 display:
//!
//! ```text
//! row 0  LEAD PLACEMENT: GOOD
//! row 1
//! row 2  --Link Established--
//! row 3
//! ```
//!
//! Every write covers a whole row so stale characters from a longer
//! previous message never linger. Text wider than the display is cut at
//! [`LCD_COLS`]; on an HD44780 the overflow would otherwise wrap from row 0
//! into row 2 and clobber the link status.
//!
//! Widths are counted in characters. The display only has ASCII glyphs, so
//! any other character is written as `?` and takes one column.

use heapless::String;

use crate::config::{CONNECTION_ROW, LCD_COLS, LEAD_PLACEMENT_ROW};
use crate::state::{ConnectionState, LeadPlacement};
use crate::traits::{DisplayBackend, DisplayError};

/// One display row
pub type Line = String<LCD_COLS>;

/// Capacity for [`space_between`] output, wide enough for overflow
pub const SPACED_LEN: usize = LCD_COLS * 2;

pub const LEAD_PLACEMENT_LABEL: &str = "LEAD PLACEMENT:";
pub const LEAD_PLACEMENT_POOR: &str = "POOR";
pub const LEAD_PLACEMENT_GOOD: &str = "GOOD";
pub const CONNECT_PROMPT: &str = "Connect to Computer";
pub const LINK_ESTABLISHED: &str = "--Link Established--";

/// Right-pad `text` with spaces to exactly [`LCD_COLS`] characters
pub fn pad_line(text: &str) -> Line {
    let mut line = Line::new();
    push_until_full(&mut line, text);
    while line.len() < LCD_COLS {
        let _ = line.push(' ');
    }
    line
}

/// Place `left` and `right` at opposite edges of a row
///
/// If the two do not leave room for at least one space they are simply
/// concatenated.
pub fn space_between(left: &str, right: &str) -> String<SPACED_LEN> {
    let mut out = String::new();
    push_until_full(&mut out, left);

    let used = left.chars().count() + right.chars().count();
    if used < LCD_COLS {
        for _ in 0..LCD_COLS - used {
            let _ = out.push(' ');
        }
    }

    push_until_full(&mut out, right);
    out
}

fn push_until_full<const N: usize>(out: &mut String<N>, text: &str) {
    for c in text.chars() {
        let c = if c.is_ascii() { c } else { '?' };
        if out.push(c).is_err() {
            break;
        }
    }
}

/// Row 0 text for a lead placement
pub fn lead_placement_text(placement: LeadPlacement) -> String<SPACED_LEN> {
    let status = match placement {
        LeadPlacement::Fault => LEAD_PLACEMENT_POOR,
        LeadPlacement::Ok => LEAD_PLACEMENT_GOOD,
    };
    space_between(LEAD_PLACEMENT_LABEL, status)
}

/// Row 2 text for a link state
pub fn connection_text(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Disconnected => CONNECT_PROMPT,
        ConnectionState::Connected => LINK_ESTABLISHED,
    }
}

/// Renders monitor state onto a character display
pub struct Presenter<D> {
    display: D,
}

impl<D: DisplayBackend> Presenter<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    /// Write a full row starting at column 0
    pub fn write_line(&mut self, text: &str, row: u8) -> Result<(), DisplayError> {
        let line = pad_line(text);
        self.display.draw_text(row, 0, &line)
    }

    pub fn render_lead_placement(&mut self, placement: LeadPlacement) -> Result<(), DisplayError> {
        self.write_line(&lead_placement_text(placement), LEAD_PLACEMENT_ROW)
    }

    pub fn render_connection(&mut self, state: ConnectionState) -> Result<(), DisplayError> {
        self.write_line(connection_text(state), CONNECTION_ROW)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
