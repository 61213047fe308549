pub mod loader;
pub mod options;
pub mod search;
pub mod template;
pub mod widget;

pub use options::{WidgetError, WidgetOptions};
pub use search::{Document, SearchHit, SearchIndex, SearchOptions};
pub use widget::Widget;
