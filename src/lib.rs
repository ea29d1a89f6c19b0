//! Remove a fixed, semi-transparent logo watermark via reverse alpha blending.
//!
//! The watermark is a static logo blended onto the bottom-right corner of
//! images at one of two known sizes (48x48 or 96x96, chosen from the image
//! dimensions). Given calibrated reference renders of the logo embedded in
//! the binary, this crate derives a per-pixel alpha map and inverts the
//! forward blending equation to recover the original pixels.
//!
//! # Quick Start
//!
//! ```no_run
//! use unwatermark::WatermarkEngine;
//!
//! let engine = WatermarkEngine::new().expect("failed to init engine");
//! let img = image::open("photo.jpg").unwrap().to_rgba8();
//! let cleaned = engine.remove(&img);
//! cleaned.save("cleaned.png").unwrap();
//! ```
//!
//! # Batch processing
//!
//! Independent files can be processed concurrently with a bounded worker
//! pool; one undecodable file never aborts the rest of the batch.
//!
//! ```no_run
//! use unwatermark::{pipeline, Job, WatermarkEngine};
//!
//! let engine = WatermarkEngine::new().expect("failed to init engine");
//! let jobs = vec![Job::new("in/a.png", "out/a.png"), Job::new("in/b.jpg", "out/b.jpg")];
//! let results = pipeline::run(&engine, &jobs, 4).unwrap();
//! let summary = pipeline::summarize(&results);
//! println!("{} of {} succeeded", summary.succeeded, summary.attempted);
//! ```

#![deny(missing_docs)]

pub mod alpha_map;
mod assets;
pub mod blend;
mod engine;
pub mod error;
pub mod geometry;
pub mod pipeline;

pub use engine::{is_supported_image, WatermarkEngine};
pub use error::{Error, Result};
pub use geometry::WatermarkConfig;
pub use pipeline::{BatchSummary, Job, JobResult};
