use crate::error::ChefError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::fs;

/// Represents the source of an ingredient image
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded PNG data
    Base64(String),
}

/// An image ready to embed in a provider request
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// MIME type, e.g. "image/png"
    pub media_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Prepare an image source for a provider request
///
/// Files are read asynchronously and base64-encoded; the media type comes
/// from the file extension. Pre-encoded data is assumed to be PNG.
///
/// # Errors
/// Returns an error if the file cannot be read or the extension is not one
/// the providers accept.
pub async fn encode(source: &ImageSource) -> Result<EncodedImage, ChefError> {
    match source {
        ImageSource::Path(path) => {
            let media_type = media_type_for(path)?;
            let image_data = fs::read(path).await?;
            Ok(EncodedImage {
                media_type: media_type.to_string(),
                data: STANDARD.encode(&image_data),
            })
        }
        ImageSource::Base64(data) => Ok(EncodedImage {
            media_type: "image/png".to_string(),
            data: data.clone(),
        }),
    }
}

fn media_type_for(path: &str) -> Result<&'static str, ChefError> {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        Ok("image/png")
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        Ok("image/jpeg")
    } else if lower.ends_with(".gif") {
        Ok("image/gif")
    } else if lower.ends_with(".webp") {
        Ok("image/webp")
    } else {
        Err(ChefError::UnsupportedImage(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known_extensions() {
        assert_eq!(media_type_for("dinner.png").unwrap(), "image/png");
        assert_eq!(media_type_for("dinner.JPG").unwrap(), "image/jpeg");
        assert_eq!(media_type_for("dinner.jpeg").unwrap(), "image/jpeg");
        assert_eq!(media_type_for("dinner.webp").unwrap(), "image/webp");
    }

    #[test]
    fn test_media_type_for_unknown_extension() {
        let result = media_type_for("dinner.tiff");
        assert!(matches!(result, Err(ChefError::UnsupportedImage(_))));
    }

    #[tokio::test]
    async fn test_encode_base64_passthrough() {
        let source = ImageSource::Base64("aGVsbG8=".to_string());
        let encoded = encode(&source).await.unwrap();
        assert_eq!(encoded.media_type, "image/png");
        assert_eq!(encoded.data, "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_encode_missing_file() {
        let source = ImageSource::Path("/nonexistent/dinner.png".to_string());
        let result = encode(&source).await;
        assert!(matches!(result, Err(ChefError::Image(_))));
    }
}
