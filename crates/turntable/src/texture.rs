use crate::error::CarouselError;
use crate::panel::FacePair;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImagePath(String);

crate::impl_string_newtype!(ImagePath);

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture '{path}': {reason}")]
    Load { path: ImagePath, reason: String },
    #[error("Failed to mirror texture '{0}'")]
    Mirror(ImagePath),
}

pub trait TextureProvider {
    type Texture;

    fn load(&self, path: &ImagePath) -> Result<Self::Texture, TextureError>;

    /// Copy of `texture` flipped about its vertical axis.
    fn mirror_horizontal(&self, texture: &Self::Texture) -> Option<Self::Texture>;
}

/// Loads every front and back image, all or nothing.
///
/// Back images are mirrored before they are paired. The first failure aborts
/// the whole batch; no partial set is ever returned.
pub fn load_face_batch<P: TextureProvider>(
    provider: &P,
    fronts: &[ImagePath],
    backs: &[ImagePath],
) -> Result<Vec<FacePair<P::Texture>>, CarouselError> {
    if fronts.len() != backs.len() {
        return Err(CarouselError::TextureCountMismatch {
            fronts: fronts.len(),
            backs: backs.len(),
        });
    }

    let front_textures = fronts
        .iter()
        .map(|path| provider.load(path))
        .collect::<Result<Vec<_>, _>>()?;

    let back_textures = backs
        .iter()
        .map(|path| {
            let raw = provider.load(path)?;
            provider
                .mirror_horizontal(&raw)
                .ok_or_else(|| TextureError::Mirror(path.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Loaded {} texture pairs", front_textures.len());

    Ok(front_textures
        .into_iter()
        .zip(back_textures)
        .map(|(front, back)| FacePair::new(front, back))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Images are single rows of pixels keyed by path.
    struct MemoryTextures {
        images: HashMap<String, Vec<u8>>,
        loads: RefCell<Vec<String>>,
    }

    impl MemoryTextures {
        fn new(entries: &[(&str, Vec<u8>)]) -> Self {
            Self {
                images: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextureProvider for MemoryTextures {
        type Texture = Vec<u8>;

        fn load(&self, path: &ImagePath) -> Result<Vec<u8>, TextureError> {
            self.loads.borrow_mut().push(path.to_string());
            self.images
                .get(path.as_str())
                .cloned()
                .ok_or_else(|| TextureError::Load {
                    path: path.clone(),
                    reason: "not found".to_string(),
                })
        }

        fn mirror_horizontal(&self, texture: &Vec<u8>) -> Option<Vec<u8>> {
            Some(texture.iter().rev().copied().collect())
        }
    }

    fn paths(names: &[&str]) -> Vec<ImagePath> {
        names.iter().map(|n| ImagePath::new(*n)).collect()
    }

    #[test]
    fn test_batch_pairs_and_mirrors_backs() {
        let provider = MemoryTextures::new(&[("a", vec![1, 2, 3]), ("b", vec![4, 5, 6])]);
        let pairs = load_face_batch(&provider, &paths(&["a", "b"]), &paths(&["b", "a"])).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], FacePair::new(vec![1, 2, 3], vec![6, 5, 4]));
        assert_eq!(pairs[1], FacePair::new(vec![4, 5, 6], vec![3, 2, 1]));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let provider = MemoryTextures::new(&[("a", vec![1])]);
        let result = load_face_batch(&provider, &paths(&["a", "a"]), &paths(&["a", "missing"]));
        match result {
            Err(CarouselError::Asset(TextureError::Load { path, .. })) => {
                assert_eq!(path.as_str(), "missing")
            }
            other => panic!("expected asset error, got {other:?}"),
        }
    }

    #[test]
    fn test_count_mismatch_rejected_before_loading() {
        let provider = MemoryTextures::new(&[("a", vec![1])]);
        let result = load_face_batch(&provider, &paths(&["a", "a"]), &paths(&["a"]));
        assert!(matches!(
            result,
            Err(CarouselError::TextureCountMismatch { fronts: 2, backs: 1 })
        ));
        assert!(provider.loads.borrow().is_empty());
    }

    #[test]
    fn test_image_path_deserializes_transparently() {
        let path: ImagePath = serde_json::from_str("\"./img/call.png\"").unwrap();
        assert_eq!(path, ImagePath::new("./img/call.png"));
        assert_eq!(path.to_string(), "./img/call.png");
    }
}
