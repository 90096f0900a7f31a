//! RTS Save - save-game capture and restore for live triggers
//!
//! - [`SaveGame::capture`] snapshots the scheduler against the script registry
//! - [`SaveGame::restore`] rebuilds it, tolerating edited scripts
//! - RON, bincode and (with the `serde_json` feature) JSON encodings
//!
//! # Example
//!
//! ```rust,ignore
//! use rts_save::{SaveGame, SaveFormat};
//!
//! let save = SaveGame::capture(&scheduler, &registry);
//! let bytes = save.encode(SaveFormat::Binary)?;
//!
//! let loaded = SaveGame::decode(&bytes, SaveFormat::Binary)?;
//! let report = loaded.restore(&mut scheduler, &registry)?;
//! ```

mod codec;
mod error;
mod record;

pub use codec::SaveFormat;
pub use error::{Error, Result};
pub use record::{RestoreReport, SaveGame, SavedMenu, SavedTrigger, SAVE_VERSION};
