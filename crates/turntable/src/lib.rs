mod macros;

pub mod angle;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod pulse;
pub mod ring;
pub mod rotation;
pub mod selector;
pub mod style;
pub mod texture;

pub use carousel::{Carousel, Frame, Release, RingPicker};
pub use config::{CarouselConfig, GeometryConfig};
pub use error::CarouselError;
