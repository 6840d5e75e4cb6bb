//! Counting logger for tests that check a code path stays silent.

use std::cell::Cell;

use log::{LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: Cell<usize> = const { Cell::new(0) };
}

struct CountingLogger;

impl Log for CountingLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, _: &Record) {
        RECORDS.with(|n| n.set(n.get() + 1));
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger;

/// Number of log records emitted on this thread while `f` runs.
pub fn records_during(f: impl FnOnce()) -> usize {
    // Another test may have installed it already.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);

    let before = RECORDS.with(Cell::get);
    f();
    RECORDS.with(Cell::get) - before
}
