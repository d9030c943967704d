use crate::{message::main::MainShutdown, prelude::*};
use lasttab_api::codec::{read_frame, write_frame};
use tokio::io::{AsyncRead, AsyncWrite};

/// Bridges the native messaging port and the bus.
///
/// Frames read from stdin are published as `HostEvent`s, and `HostRequest`s are written to stdout.
/// When the browser closes stdin, the host shuts down.
pub struct NativeHostService {
    _input: Lifeline,
    _output: Lifeline,
}

impl Service for NativeHostService {
    type Bus = MainBus;
    type Lifeline = anyhow::Result<Self>;

    fn spawn(bus: &Self::Bus) -> Self::Lifeline {
        let _input = {
            let tx = bus.tx::<HostEvent>()?;
            let tx_shutdown = bus.tx::<MainShutdown>()?;

            Self::try_task(
                "input",
                Self::run_input(tokio::io::stdin(), tx, tx_shutdown),
            )
        };

        let _output = {
            let rx = bus.rx::<HostRequest>()?;
            Self::try_task("output", Self::run_output(rx, tokio::io::stdout()))
        };

        Ok(Self { _input, _output })
    }
}

impl NativeHostService {
    async fn run_input(
        mut reader: impl AsyncRead + Unpin,
        mut tx: impl Sink<Item = HostEvent> + Unpin,
        mut tx_shutdown: impl Sink<Item = MainShutdown> + Unpin,
    ) -> anyhow::Result<()> {
        let result = Self::forward_events(&mut reader, &mut tx).await;
        tx_shutdown.send(MainShutdown {}).await.ok();

        result
    }

    async fn forward_events(
        reader: &mut (impl AsyncRead + Unpin),
        tx: &mut (impl Sink<Item = HostEvent> + Unpin),
    ) -> anyhow::Result<()> {
        loop {
            match read_frame::<HostEvent, _>(reader).await {
                Ok(Some(event)) => {
                    debug!("rx {:?}", &event);
                    tx.send(event).await?;
                }
                Ok(None) => {
                    info!("the browser closed the native messaging port");
                    return Ok(());
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping message: {}", err);
                }
                Err(err) => {
                    error!("the native messaging port failed: {}", err);
                    return Err(err.into());
                }
            }
        }
    }

    async fn run_output(
        mut rx: impl Stream<Item = HostRequest> + Unpin,
        mut writer: impl AsyncWrite + Unpin,
    ) -> anyhow::Result<()> {
        while let Some(request) = rx.recv().await {
            debug!("tx {:?}", &request);
            write_frame(&mut writer, &request).await?;
        }

        Ok(())
    }
}
