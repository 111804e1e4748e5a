use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, Sender},
};

use crate::{
    OUTPUT_QUEUE_SIZE,
    codes::{Keystroke, ascii_keystroke},
};

/// Queue between the key handler and the USB task, sized by the build config
pub type OutputChannel<M> = Channel<M, Keystroke, OUTPUT_QUEUE_SIZE>;

/// Host side of the calculator. The firmware turns each keystroke into a
/// real key tap on the USB HID interface.
#[allow(async_fn_in_trait)]
pub trait KeystrokeSink {
    async fn emit_keystroke(&mut self, stroke: Keystroke);

    /// Types out a literal string. Characters with no keystroke on a US
    /// layout are skipped
    async fn emit_text(&mut self, text: &str) {
        for c in text.chars() {
            match ascii_keystroke(c) {
                Some(stroke) => self.emit_keystroke(stroke).await,
                None => warn!("No keystroke for character {}", c as u32),
            }
        }
    }
}

impl<S: KeystrokeSink + ?Sized> KeystrokeSink for &mut S {
    async fn emit_keystroke(&mut self, stroke: Keystroke) {
        (**self).emit_keystroke(stroke).await;
    }

    async fn emit_text(&mut self, text: &str) {
        (**self).emit_text(text).await;
    }
}

/// Feeds keystrokes to the USB task. A full queue holds the key handler
/// until the USB task catches up, so long transcripts arrive whole
pub struct ChannelSink<'a, M: RawMutex, const N: usize> {
    sender: Sender<'a, M, Keystroke, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelSink<'a, M, N> {
    pub fn new(sender: Sender<'a, M, Keystroke, N>) -> Self {
        Self { sender }
    }
}

impl<M: RawMutex, const N: usize> KeystrokeSink for ChannelSink<'_, M, N> {
    async fn emit_keystroke(&mut self, stroke: Keystroke) {
        self.sender.send(stroke).await;
    }
}
