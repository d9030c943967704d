pub use crate::bus::MainBus;
pub use lasttab_api::host::{HostEvent, HostRequest};
pub use lifeline::prelude::*;
pub use log::{debug, error, info, trace, warn};
pub use postage::{sink::Sink, stream::Stream};
