//! Route `tracing` output to the browser console.
//!
//! The core crate emits `tracing` events for every encode attempt of the size
//! search. Nothing is printed until [`init_logging`] installs a subscriber.

use std::io;

use tracing::Level;
use wasm_bindgen::prelude::*;

/// Install a console subscriber at `level` (`"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`; anything else means `"info"`).
///
/// Calling it more than once is harmless; later calls are ignored.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .without_time()
        .with_target(false)
        .with_writer(ConsoleWriter::default)
        .try_init();
}

fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Buffers one formatted event and hands it to `console.log` on drop.
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_console_writer_buffers() {
        let mut writer = ConsoleWriter::default();
        writer.write_all(b"encode attempt").unwrap();
        assert_eq!(writer.buffer, b"encode attempt");
        // Empty the buffer so dropping does not reach for the JS console.
        writer.buffer.clear();
    }
}
