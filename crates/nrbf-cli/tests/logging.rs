//! Logging integration test.
//!
//! The global subscriber can only be installed once per process, so this
//! file holds a single test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use nrbf_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};
use nrbf_gadget::{GenerateOptions, generate};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_generator_events_reach_json_log() {
    let buffer = Buffer::default();
    let config = LogConfig::default()
        .with_level_filter(LevelFilter::DEBUG)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    init_logging_with_writer(&config, buffer.clone());

    generate("calc.exe", &GenerateOptions::default()).unwrap();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("generating payload"));
    assert!(output.contains("TextFormattingRunProperties"));
    assert!(output.contains("LosFormatter"));
    // the command is only logged at trace
    assert!(!output.contains("calc.exe"));
}
