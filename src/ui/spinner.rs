//! Spinner shown on stderr while a backend call is in flight

use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::oneshot;

const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Animated progress indicator; starts on creation and stops when dropped.
/// Does nothing when stderr is not a terminal.
pub struct Spinner {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        if !io::stderr().is_terminal() {
            return Self {
                stop_tx: None,
                handle: None,
            };
        }

        let message = message.into();
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(Self::run_spinner(message, stop_rx));

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.stop_internal();
    }

    fn stop_internal(&mut self) {
        let was_running = self.handle.is_some();

        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            // can't await in Drop
            handle.abort();
        }
        if was_running {
            Self::clear_line();
        }
    }

    async fn run_spinner(message: String, mut stop_rx: oneshot::Receiver<()>) {
        let mut frame = 0;
        let mut stderr = io::stderr();

        loop {
            let spinner_char = SPINNER_CHARS[frame % SPINNER_CHARS.len()];
            eprint!("\r{} {}", spinner_char, message);
            let _ = stderr.flush();

            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(SPINNER_INTERVAL) => {},
                _ = &mut stop_rx => break,
            }
        }

        Self::clear_line();
    }

    fn clear_line() {
        eprint!("\r\x1b[K");
        let _ = io::stderr().flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop_internal();
    }
}

/// Run a future with a spinner
pub async fn with_spinner<F, T>(message: impl Into<String>, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let _spinner = Spinner::start(message);
    future.await
}
