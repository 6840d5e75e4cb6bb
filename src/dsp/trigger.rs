//! Edge detection for gate/trigger voltages and panel buttons.

/*
Schmitt Trigger
===============

A trigger input is a voltage, not a boolean. Comparing against one threshold
makes a slow or noisy edge fire several times. Two thresholds with a dead
band in between fire exactly once:

     V
   high ─ ─ ─ ─ ─ ─ ╭────╮─ ─ ─ ─ ─ ─
                   ╱      ╲
   low  ─ ─ ─ ─ ─ ╱─ ─ ─ ─ ╲─ ─ ─ ─ ─
         ────────╯          ╰────────
                 ↑ fires here (crosses high while low)

   state low  → goes high when input ≥ high, reports a rising edge
   state high → goes low  when input ≤ low

Everything between the thresholds keeps the current state. The trigger
starts low, so an input that is already high on the first sample fires.
*/

/// Two-threshold rising-edge detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    pub const fn new() -> Self {
        Self { high: false }
    }

    /// Returns `true` on the sample the input rises through `high`.
    #[inline]
    pub fn process(&mut self, input: f32, low: f32, high: f32) -> bool {
        if self.high {
            if input <= low {
                self.high = false;
            }
            false
        } else if input >= high {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}

/// One-shot detector for a jack being unplugged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionWatch {
    was_connected: bool,
}

impl ConnectionWatch {
    pub const fn new() -> Self {
        Self {
            was_connected: false,
        }
    }

    /// `true` only on the sample a connected jack becomes unconnected.
    #[inline]
    pub fn disconnected(&mut self, connected: bool) -> bool {
        let edge = self.was_connected && !connected;
        self.was_connected = connected;
        edge
    }

    pub fn reset(&mut self) {
        self.was_connected = false;
    }
}

/// Holds high for a fixed time after `trigger`. Used for indicator lights.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PulseGenerator {
    remaining: f32,
}

impl PulseGenerator {
    pub const fn new() -> Self {
        Self { remaining: 0.0 }
    }

    /// Start a pulse. A longer pending pulse is not shortened.
    pub fn trigger(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    /// Advance by `sample_time` and report whether the pulse is still high.
    #[inline]
    pub fn process(&mut self, sample_time: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= sample_time;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schmitt_fires_once_per_edge() {
        let mut trig = SchmittTrigger::new();
        let input = [0.0, 0.5, 1.0, 2.0, 0.5, 1.5, 0.05, 1.0];
        let fired: Vec<bool> = input.iter().map(|&v| trig.process(v, 0.1, 1.0)).collect();
        assert_eq!(
            fired,
            [false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn schmitt_starts_low() {
        let mut trig = SchmittTrigger::new();
        assert!(trig.process(5.0, 0.1, 1.0));
        assert!(trig.is_high());
        trig.reset();
        assert!(!trig.is_high());
    }

    #[test]
    fn button_thresholds_use_zero_low() {
        let mut trig = SchmittTrigger::new();
        assert!(trig.process(1.0, 0.0, 1.0));
        assert!(!trig.process(0.5, 0.0, 1.0));
        assert!(!trig.process(1.0, 0.0, 1.0));
        assert!(!trig.process(0.0, 0.0, 1.0));
        assert!(trig.process(1.0, 0.0, 1.0));
    }

    #[test]
    fn connection_watch_reports_unplug_only() {
        let mut watch = ConnectionWatch::new();
        assert!(!watch.disconnected(false));
        assert!(!watch.disconnected(true));
        assert!(!watch.disconnected(true));
        assert!(watch.disconnected(false));
        assert!(!watch.disconnected(false));
    }

    #[test]
    fn pulse_lasts_its_duration() {
        let sample_time = 1.0 / 48_000.0;
        let mut pulse = PulseGenerator::new();
        assert!(!pulse.process(sample_time));

        pulse.trigger(0.001);
        let high = (0..100).filter(|_| pulse.process(sample_time)).count();
        assert!((48..=49).contains(&high), "{high}");
        assert!(!pulse.process(sample_time));
    }
}
