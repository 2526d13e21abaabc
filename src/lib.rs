//! # colcrate
//!
//! Simplifies the triangle runs of line-oriented collision files.
//!
//! Input files mix structural lines with `TRI` records. Consecutive triangle
//! lines are grouped by their collision-type key, each group is rebuilt as a
//! mesh, welded, crease-split, dissolved and re-triangulated, and the result
//! is written to a sibling file with the original structure preserved.
//!
//! This is the umbrella crate. It re-exports the sub-crates and hosts the
//! file-level orchestration.
//!
//! ## Quick Start
//!
//! ```rust
//! use colcrate::prelude::*;
//!
//! let input = "COLLISIONTYPE 0\nTRI 0;0;0 10;0;0 0;10;0\n";
//! let mut processor = CollisionProcessor::new(EditorScene::new(), ProcessorConfig::default());
//! let (lines, report) = processor.process_str(input).unwrap();
//! assert_eq!(lines.len(), 2);
//! assert_eq!(report.groups, 1);
//! ```

pub mod config;
pub mod observer;
pub mod processor;

pub use colcrate_core::*;

pub use colcrate_io as io;
pub use colcrate_simplification as simplification;

pub use config::{GroupFailurePolicy, ProcessorConfig};
pub use observer::{ProcessObserver, TracingObserver};
pub use processor::{CollisionProcessor, ProcessReport};

/// Convenient imports for common use cases
pub mod prelude {
    pub use colcrate_core::*;
    pub use colcrate_io::*;
    pub use colcrate_simplification::*;

    pub use crate::config::{GroupFailurePolicy, ProcessorConfig};
    pub use crate::observer::{ProcessObserver, TracingObserver};
    pub use crate::processor::{CollisionProcessor, ProcessReport};
}
