use std::time::Instant;

use crate::PROGRESS_FREQUENCY_SECONDS;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

struct Progress {
    label: String,
    processed_items: usize,
    total_items: usize,
    started_at: Instant,
    last_printed_at: Instant,
}

impl Progress {
    fn new(label: String, total_items: usize) -> Progress {
        Progress {
            label,
            processed_items: 0,
            total_items,
            started_at: Instant::now(),
            last_printed_at: Instant::now(),
        }
    }

    // Returns when done
    fn next(&mut self) -> Option<(f64, String)> {
        self.processed_items += 1;
        if self.processed_items >= self.total_items {
            let elapsed = elapsed_seconds(self.started_at);
            let line = format!(
                "{} ({})... {}",
                self.label,
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed)
            );
            info!("{}", line);
            return Some((elapsed, line));
        } else if elapsed_seconds(self.last_printed_at) >= PROGRESS_FREQUENCY_SECONDS {
            self.last_printed_at = Instant::now();
            debug!(
                "{}: {}/{}... {}",
                self.label,
                prettyprint_usize(self.processed_items),
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed_seconds(self.started_at))
            );
        }
        None
    }
}

enum StackEntry {
    TimerSpan(TimerSpan),
    Progress(Progress),
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

/// Hierarchial phase timing. Spans and iteration progress are logged as they happen; notes and
/// warnings are repeated in a summary when the Timer is dropped, so nothing interesting scrolls
/// out of view.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<StackEntry>,

    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<S: Into<String>>(raw_name: S) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end.
    pub fn note(&mut self, line: String) {
        info!("{}", line);
        self.notes.push(line);
    }

    pub fn warn(&mut self, line: String) {
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        info!("{}...", name);
        self.stack.push(StackEntry::TimerSpan(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_results: Vec::new(),
        }));
    }

    pub fn stop<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        let span = match self.stack.pop() {
            Some(StackEntry::TimerSpan(s)) => s,
            _ => panic!("Timer::stop({}) without a matching start", name),
        };
        assert_eq!(span.name, name);
        let line = format!(
            "{} took {}",
            name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );

        let padding = "  ".repeat(self.stack.len());
        match self.stack.last_mut() {
            Some(StackEntry::TimerSpan(ref mut s)) => {
                s.nested_results.push(format!("{}- {}", padding, line));
                s.nested_results.extend(span.nested_results);
            }
            Some(StackEntry::Progress(_)) => unreachable!(),
            None => {
                self.results.push(format!("{}- {}", padding, line));
                self.results.extend(span.nested_results);
            }
        }

        info!("{}", line);
    }

    pub fn start_iter<S: Into<String>>(&mut self, raw_name: S, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let name = raw_name.into();
        if let Some(StackEntry::Progress(p)) = self.stack.last() {
            panic!(
                "Can't start_iter({}) while Progress({}) is top of the stack",
                name, p.label
            );
        }

        self.stack
            .push(StackEntry::Progress(Progress::new(name, total_items)));
    }

    pub fn next(&mut self) {
        let maybe_result =
            if let Some(StackEntry::Progress(ref mut progress)) = self.stack.last_mut() {
                progress.next()
            } else {
                panic!("Can't next() while a TimerSpan is top of the stack");
            };
        if let Some((_, result)) = maybe_result {
            self.stack.pop();
            let padding = "  ".repeat(self.stack.len());
            match self.stack.last_mut() {
                Some(StackEntry::TimerSpan(ref mut s)) => {
                    s.nested_results.push(format!("{}- {}", padding, result));
                }
                Some(StackEntry::Progress(_)) => unreachable!(),
                None => {
                    self.results.push(format!("{}- {}", padding, result));
                }
            }
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let stop_name = self.outermost_name.clone();

        // If we're unwinding from an error partway through, don't further blow up.
        match self.stack.last() {
            Some(StackEntry::TimerSpan(ref s)) if s.name == stop_name => {}
            _ => {
                warn!("dropping Timer {} before its phases finished", stop_name);
                return;
            }
        }

        self.stop(stop_name);
        for line in &self.results {
            info!("{}", line);
        }

        if !self.notes.is_empty() {
            info!("{} notes:", self.notes.len());
            for line in &self.notes {
                info!("{}", line);
            }
        }

        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}
