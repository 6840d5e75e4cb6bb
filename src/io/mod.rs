// Purpose - host-facing value types: jacks, pitch conversion, control messages

pub mod converter;
pub mod message;

pub use message::{ControlMessage, MessageReceiver, ParamTarget};

/// One patch point as the host reports it: whether a cable is plugged in and
/// the voltage on it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Jack {
    pub connected: bool,
    pub voltage: f32,
}

impl Jack {
    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            voltage: 0.0,
        }
    }

    pub const fn patched(voltage: f32) -> Self {
        Self {
            connected: true,
            voltage,
        }
    }

    /// The patched voltage, or `default` when nothing is plugged in.
    #[inline]
    pub fn voltage_or(&self, default: f32) -> f32 {
        if self.connected {
            self.voltage
        } else {
            default
        }
    }
}
