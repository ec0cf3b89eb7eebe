// src/lib.rs

//! pricetag: barcode-driven product lookup and entry for a price tracker.
//!
//! A scan turns into exactly one of three screen workflows:
//!  - List page: resolve the barcode to a product and open it.
//!  - Product create page: put the barcode into the form and fill what the
//!    open product catalog knows about it.
//!  - Purchase create page: resolve the barcode and select the product.
//!
//! Each workflow is a `Workflow<Ctx, ScanError>` of named async steps running
//! against a shared `ScanContext`. The context carries a mount flag so that
//! results arriving after the user left the screen are dropped.

pub mod backend;
pub mod capture;
pub mod config;
pub mod core;
pub mod enricher;
pub mod error;
pub mod form;
pub mod history;
pub mod model;
pub mod orchestrator;
pub mod resolver;
pub mod ui;
pub mod workflow;

// --- Re-exports for the Public API ---

pub use crate::core::{Handler, MountGuard, ScanContext, SkipCondition, StepControl, StepDef, WorkflowOutcome};
pub use crate::workflow::Workflow;

pub use crate::backend::Backend;
pub use crate::capture::{BarcodeCapture, BarcodeDecoder, Frame, ScanPoll, ScanSession, ScanTrigger, TriggerTransition};
pub use crate::config::{CaptureConfig, CatalogConfig};
pub use crate::enricher::{CatalogLookup, EnrichmentPayload, OpenFoodFactsClient, ProductEnricher};
pub use crate::form::{FieldError, FieldResult, FormErrors, ProductField, ProductForm, PurchaseForm};
pub use crate::history::{price_history, PriceHistory, PricePoint};
pub use crate::model::{NewProduct, NewPurchase, Product, Purchase, RecordId, Store};
pub use crate::orchestrator::{ListLookupOrchestrator, ProductCreateOrchestrator, PurchaseCreateOrchestrator, ScanOutcome};
pub use crate::resolver::{ProductResolver, Resolution};
pub use crate::ui::{Navigator, Notice, NoticeLevel, Notifier, Route};

pub use crate::error::{ScanError, ScanResult};

/*
    Typical wiring:
    1. Implement `Backend` over the data store and `BarcodeDecoder` over the camera.
    2. Build a `ProductResolver` from the backend and a `ProductEnricher` from an
       `OpenFoodFactsClient` (see `CatalogConfig`).
    3. Create the orchestrator for the screen being shown, with the screen's
       `Navigator` / `Notifier`.
    4. On the scan button, call `orchestrator.scan(&mut trigger).await` with a
       `ScanTrigger` over the decoder.
    5. When the screen goes away, call `orchestrator.mount_guard().unmount()`.
*/
