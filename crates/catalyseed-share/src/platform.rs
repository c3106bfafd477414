use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::target::ShareTarget;

/// Social platforms with a web share intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    Linkedin,
    Facebook,
    Whatsapp,
    Telegram,
    Reddit,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 6] = [
        SharePlatform::Twitter,
        SharePlatform::Linkedin,
        SharePlatform::Facebook,
        SharePlatform::Whatsapp,
        SharePlatform::Telegram,
        SharePlatform::Reddit,
    ];

    /// Looks up a platform by its wire name. Unknown names yield `None`;
    /// callers treat that as a no-op rather than an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "twitter" => Some(SharePlatform::Twitter),
            "linkedin" => Some(SharePlatform::Linkedin),
            "facebook" => Some(SharePlatform::Facebook),
            "whatsapp" => Some(SharePlatform::Whatsapp),
            "telegram" => Some(SharePlatform::Telegram),
            "reddit" => Some(SharePlatform::Reddit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SharePlatform::Twitter => "twitter",
            SharePlatform::Linkedin => "linkedin",
            SharePlatform::Facebook => "facebook",
            SharePlatform::Whatsapp => "whatsapp",
            SharePlatform::Telegram => "telegram",
            SharePlatform::Reddit => "reddit",
        }
    }

    /// Web intent URL that opens the platform's share dialog pre-filled
    /// with the blurb and the canonical `share_url`.
    pub fn intent_url(&self, target: &ShareTarget, share_url: &str) -> String {
        let text = share_text(target);
        match self {
            SharePlatform::Twitter => format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(&text),
                encode(share_url),
            ),
            SharePlatform::Linkedin => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}&title={}&summary={}",
                encode(share_url),
                encode(&target.title),
                encode(&truncate_chars(&target.description, 200)),
            ),
            SharePlatform::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
                encode(share_url),
                encode(&text),
            ),
            SharePlatform::Whatsapp => format!(
                "https://wa.me/?text={}",
                encode(&format!("{text}\n\n{share_url}")),
            ),
            SharePlatform::Telegram => format!(
                "https://t.me/share/url?url={}&text={}",
                encode(share_url),
                encode(&text),
            ),
            SharePlatform::Reddit => format!(
                "https://reddit.com/submit?url={}&title={}",
                encode(share_url),
                encode(&target.title),
            ),
        }
    }
}

impl std::fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Blurb used as the pre-filled post body: title, a ~100 character
/// excerpt of the description, then the hashtag line.
pub fn share_text(target: &ShareTarget) -> String {
    let tags = target
        .hashtags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}\n\n{}...\n\n#Catalyseed {}",
        target.title,
        truncate_chars(&target.description, 100),
        tags,
    )
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Shareable;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(SharePlatform::parse("Twitter"), Some(SharePlatform::Twitter));
        assert_eq!(SharePlatform::parse(" reddit "), Some(SharePlatform::Reddit));
        assert_eq!(SharePlatform::parse("myspace"), None);
    }

    #[test]
    fn every_platform_round_trips_its_name() {
        for platform in SharePlatform::ALL {
            assert_eq!(SharePlatform::parse(platform.name()), Some(platform));
        }
    }

    #[test]
    fn share_text_includes_brand_and_hashtags() {
        let target = crate::target::fixtures::story().share_target();
        let text = share_text(&target);
        assert!(text.starts_with("GreenCell Energy\n\n"));
        assert!(text.contains("#Catalyseed"));
        assert!(text.ends_with("#TamilNaduStartups #Innovation #Entrepreneurship #AgriTech"));
    }

    #[test]
    fn intent_urls_embed_encoded_share_url() {
        let target = crate::target::fixtures::story().share_target();
        let share_url = "https://catalyseed.com/success-stories/abc?story=x";
        for platform in SharePlatform::ALL {
            let intent = platform.intent_url(&target, share_url);
            assert!(intent.contains("https%3A%2F%2Fcatalyseed%2Ecom"), "{intent}");
            assert!(!intent.contains(' '), "{intent}");
        }
    }

    #[test]
    fn whatsapp_bundles_text_and_url() {
        let target = crate::target::fixtures::story().share_target();
        let intent = SharePlatform::Whatsapp.intent_url(&target, "https://c.example/s/1");
        assert!(intent.starts_with("https://wa.me/?text="));
        assert!(intent.contains("%0A%0A"));
    }
}
