pub mod row;
pub mod reader;
pub mod parser;
pub mod scene_ref;

pub use row::{ChoiceOption, Command, Highlight, LoadMode, ScriptRow, Side};
pub use parser::{parse_sheet, Sheet, SheetError};
pub use scene_ref::SceneRef;
