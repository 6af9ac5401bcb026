//! Vendor language code mapping

use crate::capabilities::LanguageSelection;

/// Maps caller language codes to the codes a vendor expects.
///
/// Codes missing from the table pass through unchanged; auto-detect resolves
/// to the vendor's auto-detect (or default) code.
#[derive(Debug, Clone, Copy)]
pub struct LanguageMap {
    auto_detect: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl LanguageMap {
    pub const fn new(
        auto_detect: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            auto_detect,
            entries,
        }
    }

    /// A map with no table, only an auto-detect substitute
    pub const fn passthrough(auto_detect: &'static str) -> Self {
        Self::new(auto_detect, &[])
    }

    pub fn auto_detect(&self) -> &'static str {
        self.auto_detect
    }

    pub fn normalize(&self, selection: &LanguageSelection) -> String {
        match selection {
            LanguageSelection::AutoDetect => self.auto_detect.to_string(),
            LanguageSelection::Code(code) => self
                .entries
                .iter()
                .find(|(from, _)| *from == code)
                .map(|(_, to)| (*to).to_string())
                .unwrap_or_else(|| code.clone()),
        }
    }
}
