use gdk_pixbuf::Pixbuf;
use turntable::texture::{ImagePath, TextureError, TextureProvider};

#[derive(Debug, Clone, Copy, Default)]
pub struct PixbufTextures;

impl TextureProvider for PixbufTextures {
    type Texture = Pixbuf;

    fn load(&self, path: &ImagePath) -> Result<Pixbuf, TextureError> {
        Pixbuf::from_file(path.as_str()).map_err(|e| TextureError::Load {
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    fn mirror_horizontal(&self, texture: &Pixbuf) -> Option<Pixbuf> {
        texture.flip(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdk_pixbuf::Colorspace;

    #[test]
    fn test_missing_file_is_a_load_error() {
        let path = ImagePath::new("/nonexistent/carousel/front.png");
        match PixbufTextures.load(&path) {
            Err(TextureError::Load { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a load error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_mirror_swaps_left_and_right() {
        let Some(pixbuf) = Pixbuf::new(Colorspace::Rgb, false, 8, 2, 1) else {
            panic!("pixbuf allocation failed");
        };
        pixbuf.put_pixel(0, 0, 255, 0, 0, 255);
        pixbuf.put_pixel(1, 0, 0, 0, 255, 255);

        let mirrored = PixbufTextures.mirror_horizontal(&pixbuf).unwrap();
        let bytes = mirrored.read_pixel_bytes();
        assert_eq!(&bytes[0..3], &[0, 0, 255]);
        assert_eq!(&bytes[3..6], &[255, 0, 0]);
    }
}
