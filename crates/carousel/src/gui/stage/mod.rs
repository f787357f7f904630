pub mod model;
pub mod view;

pub use model::Stage;
pub use view::draw;

/// How long a pressed slide button keeps its press flash.
pub const FAST_CLICK_MS: u64 = 120;
