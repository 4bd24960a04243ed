use std::fmt::Display;

use crate::Timer;

// - If it doesn't make sense to plumb Timer to a library call, return Warn<T>.
// - If a Timer is available and there's a Warn<T>, use get().
// - Warnings can be plain strings or structured records; anything Display works with a Timer.
pub struct Warn<T, D = String> {
    value: T,
    warnings: Vec<D>,
}

impl<T, D> Warn<T, D> {
    pub fn warnings(value: T, warnings: Vec<D>) -> Warn<T, D> {
        Warn { value, warnings }
    }

    /// Split into the value and everything that went wrong producing it.
    pub fn into_parts(self) -> (T, Vec<D>) {
        (self.value, self.warnings)
    }

    /// Keep the value, moving the warnings into some other collection.
    pub fn drain_into(self, sink: &mut Vec<D>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

impl<T, D: Display> Warn<T, D> {
    pub fn get(self, timer: &mut Timer) -> T {
        for w in self.warnings {
            timer.warn(w.to_string());
        }
        self.value
    }
}
