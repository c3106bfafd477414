//! Social sharing for Catalyseed content.
//!
//! Everything here is built around [`ShareTarget`], a flattened view of a
//! piece of content with every field already defaulted. The pure layers
//! (slugs, canonical URLs, platform intent URLs) never touch I/O; the
//! renderer resolves remote assets up front and then draws synchronously;
//! the [`ShareComposer`] ties them to the document store so that shares
//! and likes are counted.

pub mod composer;
pub mod image;
pub mod platform;
pub mod resolver;
pub mod slug;
pub mod target;
pub mod text;
pub mod url;

pub use composer::{IntentLauncher, LikeOutcome, ShareComposer};
pub use image::{RenderedShareImage, ShareImageRenderer};
pub use platform::SharePlatform;
pub use resolver::{AssetResolver, HttpAssetResolver, StaticAssetResolver};
pub use slug::slugify;
pub use target::{ShareTarget, Shareable, StatLine};
pub use text::{FontPainter, TextPainter};
pub use url::ShareUrlBuilder;
