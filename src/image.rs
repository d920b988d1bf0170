//! 图片地址解析
//!
//! 内容后端的图片引用格式为 `image-<assetId>-<W>x<H>-<format>`，
//! 对应 CDN 地址 `<base_url>/images/<project>/<dataset>/<assetId>-<W>x<H>.<format>`。

use tracing::warn;

use crate::config::ImageConfig;
use crate::error::CartError;
use crate::models::ImageRef;

#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base_url: String,
    project_id: String,
    dataset: String,
    placeholder: String,
}

impl ImageUrlBuilder {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            placeholder: config.placeholder.clone(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// 将资源引用转换为 CDN 地址
    pub fn url_for(&self, reference: &str) -> Result<String, CartError> {
        let invalid = || CartError::InvalidImageRef(reference.to_string());

        let rest = reference.strip_prefix("image-").ok_or_else(invalid)?;
        let (rest, format) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let (asset_id, dimensions) = rest.rsplit_once('-').ok_or_else(invalid)?;

        let (width, height) = dimensions.split_once('x').ok_or_else(invalid)?;
        let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if asset_id.is_empty() || format.is_empty() || !is_number(width) || !is_number(height) {
            return Err(invalid());
        }

        Ok(format!(
            "{}/images/{}/{}/{}-{}.{}",
            self.base_url, self.project_id, self.dataset, asset_id, dimensions, format
        ))
    }

    /// 缺少引用或引用非法时返回占位图路径
    pub fn resolve(&self, image: Option<&ImageRef>) -> String {
        let Some(reference) = image.and_then(ImageRef::asset_ref) else {
            return self.placeholder.clone();
        };

        match self.url_for(reference) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "falling back to placeholder image");
                self.placeholder.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new(&ImageConfig {
            base_url: "https://cdn.sanity.io/".to_string(),
            project_id: "proj42".to_string(),
            dataset: "production".to_string(),
            placeholder: "/placeholder-image.png".to_string(),
        })
    }

    #[test]
    fn test_url_for() {
        let url = builder()
            .url_for("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg")
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/proj42/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn test_url_for_rejects_malformed() {
        let b = builder();
        for bad in ["", "file-abc-1x1-pdf", "image-abc", "image-abc-1y1-png", "image--1x1-png"] {
            assert!(
                matches!(b.url_for(bad), Err(CartError::InvalidImageRef(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let b = builder();
        assert_eq!(b.resolve(None), "/placeholder-image.png");
        assert_eq!(b.resolve(Some(&ImageRef::default())), "/placeholder-image.png");
        assert_eq!(
            b.resolve(Some(&ImageRef::new("garbage"))),
            "/placeholder-image.png"
        );
        assert!(b.resolve(Some(&ImageRef::new("image-a1-10x20-png"))).ends_with("/a1-10x20.png"));
    }
}
