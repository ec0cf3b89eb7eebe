// pricetag/src/capture/trigger.rs

//! The floating scan control: a two-state machine (closed / open) that turns
//! the first accepted decode of a capture session into a one-shot value.

use crate::capture::camera::BarcodeCapture;
use crate::capture::decoder::{BarcodeDecoder, Frame};
use crate::config::CaptureConfig;
use crate::error::ScanResult;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Ephemeral state of one user-initiated capture interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSession {
  pub opened_at: DateTime<Utc>,
  /// Raw text of the most recent decode, accepted or not.
  pub last_decoded: Option<String>,
  /// Consecutive frames without a symbol.
  pub idle_frames: u32,
}

impl ScanSession {
  fn open() -> Self {
    Self {
      opened_at: Utc::now(),
      last_decoded: None,
      idle_frames: 0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTransition {
  Opened,
  /// The surface was already open; no second session was started.
  AlreadyOpen,
}

/// Result of polling an open trigger once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPoll {
  /// A barcode was accepted; the trigger is closed again.
  Accepted(String),
  /// Still open, nothing accepted yet.
  Pending,
  /// The trigger is closed and nothing was forwarded.
  Closed,
}

pub struct ScanTrigger<D: BarcodeDecoder> {
  capture: BarcodeCapture<D>,
  session: Option<ScanSession>,
  config: CaptureConfig,
}

impl<D: BarcodeDecoder> ScanTrigger<D> {
  pub fn new(decoder: D) -> Self {
    Self::with_config(decoder, CaptureConfig::default())
  }

  pub fn with_config(decoder: D, config: CaptureConfig) -> Self {
    Self {
      capture: BarcodeCapture::new(decoder),
      session: None,
      config,
    }
  }

  pub fn is_open(&self) -> bool {
    self.session.is_some()
  }

  pub fn session(&self) -> Option<&ScanSession> {
    self.session.as_ref()
  }

  pub fn capture(&self) -> &BarcodeCapture<D> {
    &self.capture
  }

  /// Closed -> Open. Opening an open trigger changes nothing.
  ///
  /// A denied camera leaves the trigger closed and returns
  /// `ScanError::CameraUnavailable`.
  #[instrument(name = "ScanTrigger::activate", skip_all)]
  pub async fn activate(&mut self) -> ScanResult<TriggerTransition> {
    if self.is_open() {
      debug!("Scanner already open, ignoring activation.");
      return Ok(TriggerTransition::AlreadyOpen);
    }
    self.capture.start().await?;
    self.session = Some(ScanSession::open());
    info!("Scanner opened.");
    Ok(TriggerTransition::Opened)
  }

  /// Open -> Closed without forwarding anything. Returns whether it was open.
  pub fn cancel(&mut self) -> bool {
    let was_open = self.close();
    if was_open {
      info!("Scanner cancelled.");
    }
    was_open
  }

  fn close(&mut self) -> bool {
    self.capture.tear_down();
    self.session.take().is_some()
  }

  /// Runs one decode tick.
  pub async fn poll(&mut self) -> ScanPoll {
    if !self.is_open() {
      return ScanPoll::Closed;
    }

    let mut decoded: Option<String> = None;
    let frame = self.capture.tick(|text| decoded = Some(text.to_string())).await;

    match frame {
      Frame::Ended => {
        debug!("Decoder feed ended.");
        self.close();
        ScanPoll::Closed
      }
      Frame::Empty => {
        let idle_frames = match self.session.as_mut() {
          Some(session) => {
            session.idle_frames += 1;
            session.idle_frames
          }
          None => 0,
        };
        match self.config.max_idle_frames {
          Some(limit) if idle_frames >= limit => {
            info!(idle_frames, "No barcode seen, closing scanner.");
            self.close();
            ScanPoll::Closed
          }
          _ => ScanPoll::Pending,
        }
      }
      Frame::Decoded(_) => {
        let raw = decoded.unwrap_or_default();
        if let Some(session) = self.session.as_mut() {
          session.last_decoded = Some(raw.clone());
          session.idle_frames = 0;
        }
        // Blank decodes keep the scanner open; anything else goes out as decoded.
        if raw.trim().is_empty() {
          return ScanPoll::Pending;
        }
        let barcode = raw;
        self.close();
        info!(%barcode, "Barcode accepted.");
        ScanPoll::Accepted(barcode)
      }
    }
  }

  /// Opens the scanner if needed and waits for the first accepted barcode.
  ///
  /// `Ok(None)` means the session closed without a decode (feed ended, idle
  /// limit reached).
  pub async fn next_barcode(&mut self) -> ScanResult<Option<String>> {
    self.activate().await?;
    loop {
      match self.poll().await {
        ScanPoll::Accepted(barcode) => return Ok(Some(barcode)),
        ScanPoll::Pending => continue,
        ScanPoll::Closed => return Ok(None),
      }
    }
  }
}
