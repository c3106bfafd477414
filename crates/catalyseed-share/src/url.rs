use crate::target::ShareTarget;

pub const UTM_SOURCE: &str = "share";
pub const UTM_MEDIUM: &str = "social";
pub const UTM_CAMPAIGN: &str = "catalyseed_stories";

/// Builds canonical share URLs for content pages.
///
/// The query string always carries the fixed UTM triple plus a `story`
/// parameter holding the slug, so inbound traffic can be attributed per
/// item.
#[derive(Debug, Clone)]
pub struct ShareUrlBuilder {
    base_url: String,
}

impl ShareUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn build(&self, target: &ShareTarget) -> String {
        format!(
            "{}/{}/{}?utm_source={}&utm_medium={}&utm_campaign={}&story={}",
            self.base_url,
            target.url_path,
            target.id,
            UTM_SOURCE,
            UTM_MEDIUM,
            UTM_CAMPAIGN,
            target.slug,
        )
    }
}
