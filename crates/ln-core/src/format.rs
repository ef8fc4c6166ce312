//! Line formatters, one per sink kind.
//!
//! File lines carry a wall-clock stamp and the time since the previous file
//! line:
//!
//! ```text
//! Aug 21, 2012 2:16:05 PM (  3ms) DEBUG app::screen:33  log message
//!                         ^- elapsed since the previous line
//! ```
//!
//! Console lines are just `"<tag> <message>"`; the host console stamps them.

use chrono::{DateTime, Local};

use crate::record::{LogRecord, Origin};
use crate::tag::TagColumn;
use crate::time_util::{elapsed_ms, format_date_time, format_elapsed};

/// Mutable formatting state shared by all sinks of one logger.
#[derive(Debug)]
pub struct FormatState {
    pub tags: TagColumn,
    previous: DateTime<Local>,
    left_justify: bool,
}

impl FormatState {
    pub fn new(left_justify: bool) -> Self {
        Self { tags: TagColumn::new(), previous: Local::now(), left_justify }
    }

    pub fn left_justify(&self) -> bool {
        self.left_justify
    }

    /// Timestamp of the last file-formatted record.
    pub fn previous(&self) -> DateTime<Local> {
        self.previous
    }

    fn tag_for(&mut self, record: &LogRecord) -> String {
        match &record.origin {
            Origin::Tagged(tag) => tag.clone(),
            // Foreign targets carry no line number; the pad stands in for it.
            Origin::Foreign { target } => self.tags.justify(&format!("{target}    "), self.left_justify),
        }
    }
}

/// Formatting strategy, selected per sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    File,
    Console,
}

impl Format {
    pub fn render(self, record: &LogRecord, state: &mut FormatState) -> String {
        let tag = state.tag_for(record);
        match self {
            Self::File => {
                let elapsed = format_elapsed(elapsed_ms(state.previous, record.timestamp));
                state.previous = record.timestamp;
                format!(
                    "{} {} {:>5} {} {}\n",
                    format_date_time(record.timestamp),
                    elapsed,
                    record.level,
                    tag,
                    record.message
                )
            }
            Self::Console => format!("{tag} {}", record.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Local> {
        Local.with_ymd_and_hms(2012, 8, 21, 14, 16, 5).unwrap()
    }

    #[test]
    fn file_line_layout() {
        let mut state = FormatState::new(true);
        state.previous = base();
        let rec = LogRecord::new(Level::Debug, Origin::Tagged("app::screen:33 ".into()), "log message")
            .at(base() + Duration::milliseconds(3));
        let line = Format::File.render(&rec, &mut state);
        assert_eq!(line, "Aug 21, 2012 2:16:05 PM (  3ms) DEBUG app::screen:33  log message\n");
    }

    #[test]
    fn file_format_advances_previous() {
        let mut state = FormatState::new(true);
        state.previous = base();
        let first = LogRecord::new(Level::Info, Origin::Tagged("t".into()), "a")
            .at(base() + Duration::seconds(2));
        let second = LogRecord::new(Level::Info, Origin::Tagged("t".into()), "b")
            .at(base() + Duration::seconds(2) + Duration::milliseconds(40));
        assert!(Format::File.render(&first, &mut state).contains("( 2sec)"));
        assert!(Format::File.render(&second, &mut state).contains("( 40ms)"));
        assert_eq!(state.previous(), second.timestamp);
    }

    #[test]
    fn console_format_leaves_previous_alone() {
        let mut state = FormatState::new(true);
        state.previous = base();
        let rec = LogRecord::new(Level::Warn, Origin::Tagged("tag".into()), "msg");
        assert_eq!(Format::Console.render(&rec, &mut state), "tag msg");
        assert_eq!(state.previous(), base());
    }

    #[test]
    fn foreign_records_get_a_justified_tag() {
        let mut state = FormatState::new(true);
        state.tags.justify("a_much_longer_tag", true);
        let rec = LogRecord::new(Level::Info, Origin::Foreign { target: "hyper".into() }, "hi");
        let line = Format::Console.render(&rec, &mut state);
        assert_eq!(line, format!("{:>17} hi", "hyper    "));
    }

    #[test]
    fn foreign_tag_is_padded_without_justification() {
        let mut state = FormatState::new(false);
        let rec = LogRecord::new(Level::Info, Origin::Foreign { target: "hyper".into() }, "hi");
        assert_eq!(Format::Console.render(&rec, &mut state), "hyper     hi");
    }
}
