use crate::{
    message::main::{MainShutdown, ShortcutBinding},
    prelude::*,
};
use postage::{broadcast, mpsc};

lifeline_bus!(pub struct MainBus);

/// Every notification from the browser, in the order it was read from stdin.
impl Message<MainBus> for HostEvent {
    type Channel = broadcast::Sender<Self>;
}

impl Message<MainBus> for HostRequest {
    type Channel = mpsc::Sender<Self>;
}

impl Message<MainBus> for MainShutdown {
    type Channel = mpsc::Sender<Self>;
}

impl Resource<MainBus> for ShortcutBinding {}
