// demos/pricetag_app/src/console.rs

//! Terminal stand-ins for the camera and the screen.

use async_trait::async_trait;
use pricetag::{BarcodeDecoder, Frame, Navigator, Notice, NoticeLevel, Notifier, Route, ScanResult};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, warn};

/// Reads one decoded barcode per line, as a handheld scanner in keyboard mode
/// would type it. An empty line is a frame without a symbol; end of input
/// ends the feed.
pub struct LineDecoder {
  lines: Lines<BufReader<Stdin>>,
}

impl LineDecoder {
  pub fn stdin() -> Self {
    Self {
      lines: BufReader::new(tokio::io::stdin()).lines(),
    }
  }
}

#[async_trait]
impl BarcodeDecoder for LineDecoder {
  async fn acquire(&mut self) -> ScanResult<()> {
    println!("Scanner ready, type or scan a barcode (Ctrl-D to stop):");
    Ok(())
  }

  async fn decode_frame(&mut self) -> Frame {
    match self.lines.next_line().await {
      Ok(Some(line)) if line.trim().is_empty() => Frame::Empty,
      Ok(Some(line)) => Frame::Decoded(line.trim().to_string()),
      Ok(None) => Frame::Ended,
      Err(e) => {
        warn!(error = %e, "Reading the barcode feed failed.");
        Frame::Ended
      }
    }
  }

  fn release(&mut self) {
    debug!("Scanner released.");
  }
}

pub struct ConsoleUi;

impl Navigator for ConsoleUi {
  fn navigate(&self, route: Route) {
    println!("-> {route}");
  }
}

impl Notifier for ConsoleUi {
  fn notify(&self, notice: Notice) {
    match notice.level {
      NoticeLevel::Info => println!("[info] {}", notice.message),
      NoticeLevel::Warning => eprintln!("[warning] {}", notice.message),
    }
  }
}
