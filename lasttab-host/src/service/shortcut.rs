use crate::{message::main::ShortcutBinding, prelude::*};
use lasttab_api::{
    config::{write_config, Config},
    shortcut::Shortcut,
};
use std::path::Path;

/// Binds the configured shortcut on startup, and rebinds it when the extension's stored shortcut changes.
///
/// Changes are saved to the config file, so the next launch binds the same shortcut.
pub struct ShortcutService {
    _run: Lifeline,
}

impl Service for ShortcutService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let binding = bus.resource::<ShortcutBinding>()?;
        let mut rx = bus.rx::<HostEvent>()?;
        let mut tx = bus.tx::<HostRequest>()?;

        let _run = Self::try_task("run", async move {
            let ShortcutBinding {
                command,
                shortcut,
                config_path,
            } = binding;
            tx.send(Self::update(command.as_str(), &shortcut)).await?;

            while let Some(event) = rx.recv().await {
                if let HostEvent::ShortcutChanged { shortcut } = event {
                    match shortcut.parse::<Shortcut>() {
                        Ok(shortcut) => {
                            Self::save(config_path.as_path(), command.as_str(), &shortcut);
                            tx.send(Self::update(command.as_str(), &shortcut)).await?;
                        }
                        Err(err) => warn!("keeping the current binding: {}", err),
                    }
                }
            }

            Ok(())
        });

        Ok(Self { _run })
    }
}

impl ShortcutService {
    fn update(command: &str, shortcut: &Shortcut) -> HostRequest {
        info!("binding {} to {}", command, shortcut);

        HostRequest::UpdateCommand {
            name: command.to_string(),
            shortcut: shortcut.to_string(),
        }
    }

    /// A failed save still rebinds the shortcut for this session.
    fn save(path: &Path, command: &str, shortcut: &Shortcut) {
        let config = Config {
            shortcut: shortcut.to_string(),
            command: command.to_string(),
        };

        match write_config(path, &config) {
            Ok(()) => debug!("saved shortcut {} to {:?}", shortcut, path),
            Err(err) => warn!("failed to save shortcut to {:?}: {}", path, err),
        }
    }
}
