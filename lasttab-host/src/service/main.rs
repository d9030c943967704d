use super::{
    dispatcher::DispatcherService, native_host::NativeHostService, shortcut::ShortcutService,
};
use crate::prelude::*;

/// Launches the native host: the stdin/stdout bridge, the dispatcher, and the shortcut binding.
pub struct MainService {
    _shortcut: ShortcutService,
    _dispatcher: DispatcherService,
    _native_host: NativeHostService,
}

impl Service for MainService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        // the consumers subscribe to HostEvent before the bridge starts reading stdin
        let _shortcut = ShortcutService::spawn(bus)?;
        let _dispatcher = DispatcherService::spawn(bus)?;

        debug!("Launching NativeHostService");
        let _native_host = NativeHostService::spawn(bus)?;

        Ok(Self {
            _shortcut,
            _dispatcher,
            _native_host,
        })
    }
}
