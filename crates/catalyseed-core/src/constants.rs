//! Shared constants: branding, document collections, scorecard bounds, and
//! the fixed share-image canvas.

/// Platform brand name shown in headers and share assets.
pub const BRAND_NAME: &str = "Catalyseed";

/// Tagline rendered under the brand header on share images.
pub const BRAND_TAGLINE: &str = "Tamil Nadu Innovation Platform";

/// Footer line on share images.
pub const FOOTER_LINE: &str = "Proudly from Tamil Nadu";

/// Secondary footer line pointing at the site.
pub const FOOTER_SITE_LINE: &str = "Discover more at catalyseed.com";

/// Document collection holding user records.
pub const USERS_COLLECTION: &str = "users";

/// Document collection holding success stories.
pub const STORIES_COLLECTION: &str = "successStories";

/// Document collection holding hackathons.
pub const HACKATHONS_COLLECTION: &str = "hackathons";

/// Social-media optimal share canvas, 1200x630.
pub const SHARE_CANVAS_WIDTH: u32 = 1200;
pub const SHARE_CANVAS_HEIGHT: u32 = 630;

/// Upper bound of a single scorecard axis.
pub const MAX_AXIS_SCORE: u8 = 5;

/// Number of scorecard axes.
pub const SCORE_AXIS_COUNT: usize = 8;

/// Upper bound of the derived total score (all axes at max).
pub const MAX_TOTAL_SCORE: u8 = MAX_AXIS_SCORE * SCORE_AXIS_COUNT as u8;
