//! Native messaging framing.
//!
//! Each message is a 4-byte length in native byte order, followed by that many bytes of UTF-8 JSON.
use serde::{de::DeserializeOwned, Serialize};
use std::{
    convert::TryFrom,
    io::{self, ErrorKind},
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Browsers cap messages sent by a native host at 1MB.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Browsers send the host messages of up to 64MB.  A populated window snapshot can exceed 1MB.
pub const MAX_INBOUND_FRAME_LEN: usize = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame of {len} bytes exceeds the {limit} byte limit")]
    TooLarge { len: usize, limit: usize },
    #[error("frame is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// A malformed body leaves the stream aligned on the next frame, and can be skipped.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FrameError::Json(_))
    }
}

/// Reads the next frame from the stream.
///
/// Returns `Ok(None)` if the stream ended cleanly, on a frame boundary.
/// A stream that ends inside the length header is an `UnexpectedEof` io error.
pub async fn read_frame<T, R>(reader: &mut R) -> Result<Option<T>, FrameError>
where
    T: DeserializeOwned,
    R: AsyncRead + Unpin,
{
    let mut len_bytes = [0u8; 4];
    let mut filled = 0;
    while filled < len_bytes.len() {
        let read = reader.read(&mut len_bytes[filled..]).await?;
        if read == 0 {
            if filled == 0 {
                return Ok(None);
            }

            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("stream ended after {} bytes of a frame header", filled),
            )
            .into());
        }

        filled += read;
    }

    let len = u32::from_ne_bytes(len_bytes);
    let len = usize::try_from(len).map_err(|_| FrameError::TooLarge {
        len: usize::MAX,
        limit: MAX_INBOUND_FRAME_LEN,
    })?;
    if len > MAX_INBOUND_FRAME_LEN {
        return Err(FrameError::TooLarge {
            len,
            limit: MAX_INBOUND_FRAME_LEN,
        });
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer).await?;

    let message = serde_json::from_slice(&buffer)?;
    Ok(Some(message))
}

/// Writes the message as a single frame, and flushes the stream.
pub async fn write_frame<T, W>(writer: &mut W, message: &T) -> Result<(), FrameError>
where
    T: Serialize,
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_vec(message)?;
    if json.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge {
            len: json.len(),
            limit: MAX_FRAME_LEN,
        });
    }

    // MAX_FRAME_LEN fits in a u32
    let len = json.len() as u32;
    writer.write_all(&len.to_ne_bytes()).await?;
    writer.write_all(&json).await?;
    writer.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_frame, write_frame, FrameError, MAX_FRAME_LEN, MAX_INBOUND_FRAME_LEN};
    use crate::{
        host::{HostEvent, HostRequest},
        tab::TabId,
        window::WindowId,
    };
    use std::io::ErrorKind;

    fn frame(json: &str) -> Vec<u8> {
        let mut bytes = (json.len() as u32).to_ne_bytes().to_vec();
        bytes.extend_from_slice(json.as_bytes());
        bytes
    }

    #[tokio::test]
    async fn reads_frames_in_order() -> anyhow::Result<()> {
        let mut input = frame(r#"{"type":"tab_activated","tabId":1,"windowId":9}"#);
        input.extend(frame(r#"{"type":"action_clicked"}"#));
        let mut reader = input.as_slice();

        let first: Option<HostEvent> = read_frame(&mut reader).await?;
        assert_eq!(
            Some(HostEvent::TabActivated {
                tab_id: TabId(1),
                window_id: WindowId(9)
            }),
            first
        );

        let second: Option<HostEvent> = read_frame(&mut reader).await?;
        assert_eq!(Some(HostEvent::ActionClicked), second);

        let end: Option<HostEvent> = read_frame(&mut reader).await?;
        assert_eq!(None, end);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_oversize_frame() {
        let len = (MAX_INBOUND_FRAME_LEN as u32 + 1).to_ne_bytes();
        let mut reader = &len[..];

        let result: Result<Option<HostEvent>, FrameError> = read_frame(&mut reader).await;
        assert!(matches!(
            result,
            Err(FrameError::TooLarge {
                limit: MAX_INBOUND_FRAME_LEN,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn reads_snapshot_larger_than_outbound_limit() -> anyhow::Result<()> {
        let favicon = format!("data:image/png;base64,{}", "A".repeat(2048));
        let tabs: Vec<String> = (0..1500)
            .map(|id| {
                format!(
                    r#"{{"id":{},"windowId":1,"active":{},"url":"https://example.com/{}","title":"tab {}","favIconUrl":"{}"}}"#,
                    id,
                    id == 0,
                    id,
                    id,
                    favicon
                )
            })
            .collect();
        let json = format!(
            r#"{{"type":"all_windows","windows":[{{"id":1,"type":"normal","focused":true,"tabs":[{}]}}]}}"#,
            tabs.join(",")
        );
        assert!(json.len() > 2 * MAX_FRAME_LEN);

        let input = frame(json.as_str());
        let mut reader = input.as_slice();

        let event: Option<HostEvent> = read_frame(&mut reader).await?;
        match event {
            Some(HostEvent::AllWindows { windows }) => {
                assert_eq!(1, windows.len());
                assert_eq!(1500, windows[0].tabs.len());
            }
            other => panic!("expected a window snapshot, got {:?}", other),
        }

        Ok(())
    }

    #[tokio::test]
    async fn truncated_header_is_io_error() {
        let input = frame(r#"{"type":"action_clicked"}"#);
        let mut reader = &input[..2];

        let result: Result<Option<HostEvent>, FrameError> = read_frame(&mut reader).await;
        match result {
            Err(FrameError::Io(err)) => assert_eq!(ErrorKind::UnexpectedEof, err.kind()),
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn header_split_across_reads() -> anyhow::Result<()> {
        let input = frame(r#"{"type":"action_clicked"}"#);
        let mut reader = tokio_test::io::Builder::new()
            .read(&input[..1])
            .read(&input[1..3])
            .read(&input[3..])
            .build();

        let event: Option<HostEvent> = read_frame(&mut reader).await?;
        assert_eq!(Some(HostEvent::ActionClicked), event);

        Ok(())
    }

    #[tokio::test]
    async fn write_rejects_oversize_frame() {
        let request = HostRequest::UpdateCommand {
            name: "x".repeat(MAX_FRAME_LEN),
            shortcut: "Ctrl+Shift+1".into(),
        };
        let mut output: Vec<u8> = Vec::new();

        let result = write_frame(&mut output, &request).await;
        assert!(matches!(
            result,
            Err(FrameError::TooLarge {
                limit: MAX_FRAME_LEN,
                ..
            })
        ));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn truncated_body_is_io_error() {
        let mut input = frame(r#"{"type":"action_clicked"}"#);
        input.truncate(input.len() - 3);
        let mut reader = input.as_slice();

        let result: Result<Option<HostEvent>, FrameError> = read_frame(&mut reader).await;
        let err = result.unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn invalid_json_is_recoverable() -> anyhow::Result<()> {
        let mut input = frame(r#"{"type":"no_such_event"}"#);
        input.extend(frame(r#"{"type":"action_clicked"}"#));
        let mut reader = input.as_slice();

        let result: Result<Option<HostEvent>, FrameError> = read_frame(&mut reader).await;
        assert!(result.unwrap_err().is_recoverable());

        let next: Option<HostEvent> = read_frame(&mut reader).await?;
        assert_eq!(Some(HostEvent::ActionClicked), next);

        Ok(())
    }

    #[tokio::test]
    async fn writes_length_prefix() -> anyhow::Result<()> {
        let expected = frame(r#"{"type":"activate_tab","tabId":3}"#);
        let mut writer = tokio_test::io::Builder::new()
            .write(&expected[..4])
            .write(&expected[4..])
            .build();

        write_frame(&mut writer, &HostRequest::ActivateTab { tab_id: TabId(3) }).await?;

        Ok(())
    }
}
