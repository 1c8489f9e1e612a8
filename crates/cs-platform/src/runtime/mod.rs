pub mod event_bus;
#[allow(clippy::module_inception)]
pub mod runtime;

pub use event_bus::{command_channel, PlatformCommandReceiver, PlatformCommandSender};
pub use runtime::PlatformRuntime;
