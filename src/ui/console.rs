use std::io::Write;

use distfix::{FinalizeEvent, FinalizeEventSink};

use crate::ui::context::UiContext;
use crate::ui::views::finalize::{render_event, Stream};

/// Prints finalize progress: progress on stdout, warnings on stderr
pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl FinalizeEventSink for ConsoleEventSink {
    fn on_event(&self, event: FinalizeEvent) {
        let Some((stream, text)) = render_event(&event, self.ui.verbose, self.ui.color, self.ui.unicode)
        else {
            return;
        };

        // A closed pipe must not abort the run mid-merge.
        let _ = match stream {
            Stream::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes()).and_then(|_| out.flush())
            }
            Stream::Stderr => std::io::stderr().lock().write_all(text.as_bytes()),
        };
    }
}
