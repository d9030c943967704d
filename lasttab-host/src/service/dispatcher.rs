use crate::{
    prelude::*,
    state::recency::{RecencyTracker, RecentTabError},
};
use lasttab_api::{host::MOST_RECENT_TAB_COMMAND, window::WindowInfo};

/// Applies browser events to the recency tracker, and resolves action triggers into tab activations.
///
/// A single task owns the tracker, so events are applied one at a time, in delivery order.
pub struct DispatcherService {
    _run: Lifeline,
}

impl Service for DispatcherService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let mut rx = bus.rx::<HostEvent>()?;
        let mut tx = bus.tx::<HostRequest>()?;

        let _run = Self::try_task("run", async move {
            let mut dispatcher = Dispatcher::new(RecencyTracker::new());

            tx.send(dispatcher.startup()).await?;

            while let Some(event) = rx.recv().await {
                if let Some(request) = dispatcher.dispatch(event) {
                    tx.send(request).await?;
                }
            }

            Ok(())
        });

        Ok(Self { _run })
    }
}

/// The request kind the host names in `RequestFailed` when a current window lookup fails
const GET_CURRENT_WINDOW: &str = "get_current_window";

#[derive(Debug)]
pub struct Dispatcher {
    tracker: RecencyTracker,
    pending_triggers: usize,
}

impl Dispatcher {
    pub fn new(tracker: RecencyTracker) -> Self {
        Self {
            tracker,
            pending_triggers: 0,
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &RecencyTracker {
        &self.tracker
    }

    /// The request which seeds the tracker with the windows that are already open
    pub fn startup(&self) -> HostRequest {
        debug!("requesting the open windows");
        HostRequest::scan_windows()
    }

    pub fn dispatch(&mut self, event: HostEvent) -> Option<HostRequest> {
        trace!("dispatching {:?}", &event);

        match event {
            HostEvent::TabActivated { tab_id, window_id } => {
                self.tracker.record_activation(window_id, tab_id);
                None
            }
            HostEvent::TabRemoved {
                tab_id,
                window_id,
                is_window_closing,
            } => {
                // the WindowRemoved event clears the whole record
                if !is_window_closing {
                    self.tracker.remove_tab(window_id, tab_id);
                }

                None
            }
            HostEvent::WindowRemoved { window_id } => {
                self.tracker.remove_window(window_id);
                None
            }
            HostEvent::WindowFocusChanged { window_id } => {
                trace!("window {} focused", window_id);
                None
            }
            HostEvent::Command { command } => {
                if command == MOST_RECENT_TAB_COMMAND {
                    self.trigger("shortcut")
                } else {
                    debug!("ignoring unknown command: {}", command);
                    None
                }
            }
            HostEvent::ActionClicked => self.trigger("toolbar"),
            HostEvent::ExternalMessage { sender } => {
                debug!("external message from {:?}", sender);
                self.trigger("external message")
            }
            HostEvent::AllWindows { windows } => {
                let seeded = self.tracker.initialize_from_snapshot(&windows);
                info!("tracking {} of {} open windows", seeded, windows.len());
                None
            }
            HostEvent::CurrentWindow { window } => self.resolve(window),
            HostEvent::RequestFailed { request, error } => {
                warn!("host request {} failed: {}", request, error);

                if request == GET_CURRENT_WINDOW {
                    self.pending_triggers = self.pending_triggers.saturating_sub(1);
                }

                None
            }
            HostEvent::ShortcutChanged { .. } => None,
        }
    }

    /// Asks the host for the current window.  The switch happens when it arrives.
    fn trigger(&mut self, source: &str) -> Option<HostRequest> {
        info!("switch to the most recent tab, from {}", source);
        self.pending_triggers += 1;

        Some(HostRequest::GetCurrentWindow { populate: false })
    }

    fn resolve(&mut self, window: WindowInfo) -> Option<HostRequest> {
        if self.pending_triggers == 0 {
            debug!("ignoring current window {}, no switch is pending", window.id);
            return None;
        }

        self.pending_triggers -= 1;

        if !window.is_normal() {
            debug!(
                "current window {} is of type {:?}, ignoring",
                window.id, window.window_type
            );
            return None;
        }

        match self.tracker.query_last(window.id) {
            Ok(tab_id) => {
                debug!("activating tab {} in window {}", tab_id, window.id);
                Some(HostRequest::ActivateTab { tab_id })
            }
            Err(RecentTabError::UnknownWindow(id)) => {
                debug!("nothing known about window {}", id);
                None
            }
            Err(RecentTabError::NoRecentTab(id)) => {
                debug!("window {} has no previous tab yet", id);
                None
            }
        }
    }
}
