//! Image references.
//!
//! Image fields hold either an absolute URL or an abstract `asset:<id>`
//! reference. References are resolved ahead of rendering by an
//! [`AssetResolver`]; anything still unresolved at render time becomes
//! [`PLACEHOLDER_IMAGE_URL`].

use crate::block::{Block, BlockData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ASSET_SCHEME: &str = "asset:";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x300/png?text=Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Url(&'a str),
    Asset(&'a str),
    Missing,
}

pub fn image_ref(src: &str) -> ImageRef<'_> {
    let src = src.trim();
    if src.is_empty() {
        ImageRef::Missing
    } else if let Some(id) = src.strip_prefix(ASSET_SCHEME) {
        ImageRef::Asset(id)
    } else {
        ImageRef::Url(src)
    }
}

/// Resolves abstract asset ids to absolute URLs
pub trait AssetResolver {
    fn resolve(&self, asset_id: &str) -> Option<String>;
}

/// Map-backed resolver; ordered so lookups are reproducible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    entries: BTreeMap<String, String>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(asset_id.into(), url.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL to emit for an image field
    pub fn url_for(&self, src: &str) -> String {
        match image_ref(src) {
            ImageRef::Url(url) => url.to_string(),
            ImageRef::Asset(id) => self
                .resolve(id)
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            ImageRef::Missing => PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl AssetResolver for AssetCatalog {
    fn resolve(&self, asset_id: &str) -> Option<String> {
        self.entries.get(asset_id).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Rewrite resolvable `asset:` references to absolute URLs.
///
/// Unresolvable references are left as they are.
pub fn resolve_assets(blocks: &[Block], resolver: &dyn AssetResolver) -> Vec<Block> {
    let rewrite = |src: &mut String| {
        if let ImageRef::Asset(id) = image_ref(src) {
            if let Some(url) = resolver.resolve(id) {
                *src = url;
            }
        }
    };

    blocks
        .iter()
        .cloned()
        .map(|mut block| {
            match &mut block.data {
                BlockData::Logo { content, .. } => rewrite(&mut content.src),
                BlockData::Image { content, .. } => rewrite(&mut content.src),
                BlockData::Hero { content, .. } => {
                    if let Some(image) = content.image.as_mut() {
                        rewrite(image);
                    }
                }
                _ => {}
            }
            block
        })
        .collect()
}
