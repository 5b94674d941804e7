//! Status icons for recipe summaries

pub struct StatusIcon;

impl StatusIcon {
    /// Recipe written
    pub const SUCCESS: &'static str = "✓";

    /// Recipe not produced
    pub const SKIPPED: &'static str = "-";

    pub const EXTERNAL: &'static str = "🌐";

    pub const INTERNAL: &'static str = "🔒";

    pub fn get_exposure_icon(exposed: bool) -> &'static str {
        if exposed {
            Self::EXTERNAL
        } else {
            Self::INTERNAL
        }
    }
}
