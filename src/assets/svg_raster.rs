use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{FrameshotError, FrameshotResult},
    render::surface::Surface,
};

const MAX_DIM: u32 = 16_384;

/// Font database shared by every caption rasterization.
///
/// Built once; fonts loaded from explicit files are remembered so that a caption `font` naming a
/// file path can be mapped back to the family it registered.
#[derive(Clone, Debug)]
pub struct FontSet {
    db: Arc<usvg::fontdb::Database>,
    file_families: HashMap<PathBuf, String>,
}

impl FontSet {
    /// System fonts plus every `.ttf`/`.otf`/`.ttc` found in `font_dirs` and the given files.
    pub fn load(font_dirs: &[PathBuf], font_files: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::build(db, font_dirs, font_files)
    }

    /// Only the given directories and files, without system fonts.
    pub fn isolated(font_dirs: &[PathBuf], font_files: &[PathBuf]) -> Self {
        Self::build(usvg::fontdb::Database::new(), font_dirs, font_files)
    }

    fn build(mut db: usvg::fontdb::Database, font_dirs: &[PathBuf], font_files: &[PathBuf]) -> Self {
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let mut file_families = HashMap::new();
        for path in font_files {
            let before = db.len();
            if let Err(err) = db.load_font_file(path) {
                tracing::warn!(path = %path.display(), "failed to load font file: {err}");
                continue;
            }
            let family = db
                .faces()
                .skip(before)
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
            if let Some(family) = family {
                file_families.insert(path.clone(), family);
            }
        }

        Self {
            db: Arc::new(db),
            file_families,
        }
    }

    /// Number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Shared handle to the underlying database.
    pub fn database(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.db)
    }

    /// Family name to request for a configured `font` (family name or font file path).
    pub fn resolve_family(&self, font: &str) -> String {
        if looks_like_font_path(font) {
            if let Some(family) = self.file_families.get(Path::new(font)) {
                return family.clone();
            }
            tracing::warn!(font, "font file was not registered, falling back to sans-serif");
            return "sans-serif".to_owned();
        }
        font.to_owned()
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::load(&[], &[])
    }
}

fn looks_like_font_path(font: &str) -> bool {
    let lower = font.to_ascii_lowercase();
    lower.ends_with(".ttf") || lower.ends_with(".otf") || lower.ends_with(".ttc")
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font directory not readable, skipping");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }

            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

/// Parse an SVG document, resolving `<text>` against `fonts`.
pub fn parse_svg(svg: &str, fonts: &FontSet) -> FrameshotResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: fonts.database(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize `tree` into a `width x height` premultiplied surface, scaling the SVG viewport to fit.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> FrameshotResult<Surface> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(FrameshotError::validation(format!(
            "svg raster size {width}x{height} out of range (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FrameshotError::validation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    // tiny-skia stores premultiplied RGBA8, the same layout as `Surface`.
    Surface::from_premul(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
