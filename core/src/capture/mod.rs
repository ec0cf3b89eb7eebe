// pricetag/src/capture/mod.rs

//! Camera-side of the workflow: the decoding capability, the capture wrapper
//! around it and the one-shot scan trigger.

pub mod camera;
pub mod decoder;
pub mod trigger;

pub use camera::BarcodeCapture;
pub use decoder::{BarcodeDecoder, Frame};
pub use trigger::{ScanPoll, ScanSession, ScanTrigger, TriggerTransition};
