use crate::texture::TextureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Slide index {index} is out of range for {count} panels")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Got {fronts} front textures but {backs} back textures")]
    TextureCountMismatch { fronts: usize, backs: usize },
    #[error("Got {textures} texture pairs for {panels} panels")]
    PanelCountMismatch { textures: usize, panels: usize },
    #[error("A carousel needs at least one panel")]
    NoPanels,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Asset error: {0}")]
    Asset(#[from] TextureError),
}
