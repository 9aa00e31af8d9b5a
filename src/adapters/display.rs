use crate::core::DisplaySink;
use crate::domain::model::Status;
use std::io::Write;

/// Writes a two-line summary per evaluation, stdout by default.
#[derive(Debug)]
pub struct ConsoleDisplay<W: Write = std::io::Stdout> {
    out: W,
}

impl ConsoleDisplay {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn show(&mut self, hr: i32, spo2: i32, force: Option<bool>, status: &Status) {
        let force = force.map_or_else(|| "None".to_string(), |f| f.to_string());
        let written = writeln!(self.out, "Analyzing vital data: {} {} force: {}", hr, spo2, force)
            .and_then(|_| writeln!(self.out, "Status is: {}", status));
        if let Err(e) = written {
            tracing::debug!("Display output dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_display_format() {
        let mut display = ConsoleDisplay::new(Vec::new());
        display.show(205, 95, Some(true), &Status::Severe);
        display.show(60, 98, None, &Status::Ok);

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(
            text,
            "Analyzing vital data: 205 95 force: true\nStatus is: SEVERE?\n\
             Analyzing vital data: 60 98 force: None\nStatus is: OK\n"
        );
    }
}
