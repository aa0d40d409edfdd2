pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod port;
pub mod source;
pub mod store;

pub use error::{BranchNotFound, PlaybackError};
pub use event::{InputEvent, PlaybackEvent, UiEffect};
pub use executor::{PlaybackController, PlaybackState};
pub use port::{AssetError, AssetLoad, LoadTicket, PresentationPort};
pub use source::{CachedSource, SheetSource, SourceError, SourceProvider};
pub use store::ScriptStore;
