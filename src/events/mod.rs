//! # Events Module
//!
//! Progress reporting for corpus building and caching.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Scan(ScanEvent::Progress(p)) = event {
//!             println!("{} files scanned in {}", p.files_scanned, p.root.display());
//!         }
//!     }
//! });
//!
//! let result = builder.build_with_events(&roots, &sender);
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
