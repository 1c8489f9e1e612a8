use tokio::sync::mpsc;

use crate::ipc::PlatformCommand;

/// Commands are few and small; a short queue is plenty.
pub const COMMAND_QUEUE_CAPACITY: usize = 16;

pub type PlatformCommandSender = mpsc::Sender<PlatformCommand>;
pub type PlatformCommandReceiver = mpsc::Receiver<PlatformCommand>;

pub fn command_channel() -> (PlatformCommandSender, PlatformCommandReceiver) {
    mpsc::channel(COMMAND_QUEUE_CAPACITY)
}
