pub mod brep_scene;
pub mod handle;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod view;

pub use brep_scene::{BrepScene, EdgeSelection};
pub use handle::*;
pub use ledger::{HandleLedger, LedgerStats};
pub use traits::*;
pub use types::*;
pub use view::{DrawingView, ViewId};
