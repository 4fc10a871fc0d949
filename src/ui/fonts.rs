use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const CJK_FONT_NAME: &str = "cjk";

/// Fonts with Japanese glyphs commonly present on each platform.
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// Configured font first, then the well-known system locations.
pub fn font_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from))
        .collect()
}

/// egui's bundled fonts have no kanji; append the first readable CJK font as
/// a fallback for both families. Returns the font that was installed.
pub fn install_cjk_font(ctx: &egui::Context, configured: Option<&Path>) -> Option<PathBuf> {
    for path in font_candidates(configured) {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if Some(path.as_path()) == configured {
                    log::warn!("Configured font {} unreadable: {e}", path.display());
                }
                continue;
            }
        };

        let mut fonts = FontDefinitions::default();
        fonts.font_data.insert(
            CJK_FONT_NAME.to_owned(),
            Arc::new(FontData::from_owned(bytes)),
        );
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push(CJK_FONT_NAME.to_owned());
        }
        ctx.set_fonts(fonts);

        log::info!("Using {} for Japanese text", path.display());
        return Some(path);
    }

    log::warn!("No CJK font found; set font_path in the config to render Japanese labels");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_font_is_tried_first() {
        let configured = PathBuf::from("/opt/fonts/NotoSansJP-Regular.otf");
        let candidates = font_candidates(Some(&configured));
        assert_eq!(candidates[0], configured);
        assert_eq!(candidates.len(), SYSTEM_CJK_FONTS.len() + 1);
        assert_eq!(font_candidates(None).len(), SYSTEM_CJK_FONTS.len());
    }
}
