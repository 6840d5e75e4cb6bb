#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Which control a `SetParam` message addresses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamTarget {
    BassDecay,
    BassFilter,
    BassTimbre,
    PumpShape,
    PumpMix,
    ChannelVolume(usize),
    ChannelPan(usize),
    ChannelMute(usize),
    ChannelSolo(usize),
    ChannelCut(usize),
    Master,
}

/// Control change sent from a UI or clock thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetParam { target: ParamTarget, value: f32 },
    Trigger,
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}
