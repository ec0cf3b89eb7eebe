// pricetag/src/capture/decoder.rs

use crate::error::ScanResult;
use async_trait::async_trait;

/// What one decode tick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
  /// The decoder recognised a symbol in the frame.
  Decoded(String),
  /// No symbol in this frame. Not an error.
  Empty,
  /// The feed is gone (device lost, user closed the surface, input exhausted).
  Ended,
}

/// A camera feed that can turn frames into decoded text.
///
/// Implementations wrap whatever the platform provides; the workflow only
/// needs device acquisition, one-frame decoding and release.
#[async_trait]
pub trait BarcodeDecoder: Send {
  /// Requests access to the device. Denial must be reported as
  /// `ScanError::CameraUnavailable`.
  async fn acquire(&mut self) -> ScanResult<()>;

  /// Decodes the next frame.
  async fn decode_frame(&mut self) -> Frame;

  /// Releases the device. Called once per successful `acquire`.
  fn release(&mut self);
}
