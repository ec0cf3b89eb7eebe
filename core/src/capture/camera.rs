// pricetag/src/capture/camera.rs

use crate::capture::decoder::{BarcodeDecoder, Frame};
use crate::error::ScanResult;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
  Idle,
  Live,
}

/// A live camera feed that reports decoded text through a callback.
///
/// `tick` only polls the decoder while the capture is live, so nothing is
/// emitted between `tear_down` and the next `start`.
pub struct BarcodeCapture<D: BarcodeDecoder> {
  decoder: D,
  state: CaptureState,
}

impl<D: BarcodeDecoder> BarcodeCapture<D> {
  pub fn new(decoder: D) -> Self {
    Self {
      decoder,
      state: CaptureState::Idle,
    }
  }

  pub fn is_live(&self) -> bool {
    self.state == CaptureState::Live
  }

  /// Acquires the camera. Starting a live capture is a no-op.
  #[instrument(name = "BarcodeCapture::start", skip_all)]
  pub async fn start(&mut self) -> ScanResult<()> {
    if self.is_live() {
      return Ok(());
    }
    if let Err(e) = self.decoder.acquire().await {
      warn!(error = %e, "Camera acquisition failed.");
      return Err(e);
    }
    self.state = CaptureState::Live;
    debug!("Capture live.");
    Ok(())
  }

  /// Polls one frame and hands decoded text to `on_decode`.
  ///
  /// Returns the frame kind so callers can react to an ended feed. A capture
  /// that is not live reports `Frame::Ended` without touching the decoder.
  pub async fn tick<F>(&mut self, mut on_decode: F) -> Frame
  where
    F: FnMut(&str) + Send,
  {
    if !self.is_live() {
      return Frame::Ended;
    }
    let frame = self.decoder.decode_frame().await;
    if let Frame::Decoded(text) = &frame {
      on_decode(text);
    }
    frame
  }

  /// Releases the camera. Idempotent.
  pub fn tear_down(&mut self) {
    if self.is_live() {
      self.decoder.release();
      self.state = CaptureState::Idle;
      debug!("Capture torn down.");
    }
  }

  pub fn decoder(&self) -> &D {
    &self.decoder
  }
}

impl<D: BarcodeDecoder> Drop for BarcodeCapture<D> {
  fn drop(&mut self) {
    self.tear_down();
  }
}
