//! PNG export of the results region.
//!
//! The snapshot SVG is rasterized by the browser canvas on the web and by
//! `resvg` on desktop. The web build hands the bytes to an anchor download;
//! desktop writes them into the application's data directory.

use crate::core::controller::{ExportOutcome, SnapshotExporter};
use crate::core::error::{AnalyzerError, Result};
use crate::core::session::RenderedResults;
use crate::results::snapshot::{self, Snapshot};

const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl SnapshotExporter for PngExporter {
    async fn export(&self, results: &RenderedResults, filename: &str) -> Result<ExportOutcome> {
        let snapshot = snapshot::compose(results, &snapshot::generated_stamp());
        let bytes = build_png(&snapshot).await?;
        tracing::debug!(bytes = bytes.len(), "snapshot rasterized");
        save_bytes(filename, PNG_MIME, bytes).await
    }
}

async fn build_png(snapshot: &Snapshot) -> Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    {
        build_png_web(snapshot).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        build_png_desktop(snapshot)
    }
}

async fn save_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<ExportOutcome> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| AnalyzerError::export("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| AnalyzerError::export("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AnalyzerError::export("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| AnalyzerError::export("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| AnalyzerError::export("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| AnalyzerError::export("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(ExportOutcome::DownloadStarted)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let path = write_into(&desktop_export_dir()?, filename, &bytes)?;
        Ok(ExportOutcome::Saved(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "Bookstats", "Bookstats")
        .ok_or_else(|| AnalyzerError::export("unable to determine export directory"))?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_into(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf> {
    use std::fs;

    let io = |err: std::io::Error| AnalyzerError::export(err.to_string());
    fs::create_dir_all(dir).map_err(io)?;
    let path = dir.join(filename);
    fs::write(&path, bytes).map_err(io)?;
    Ok(path)
}

#[cfg(target_arch = "wasm32")]
async fn build_png_web(snapshot: &Snapshot) -> Result<Vec<u8>> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&snapshot.svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| AnalyzerError::export("unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| AnalyzerError::export("unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AnalyzerError::export("document unavailable"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| AnalyzerError::export("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| AnalyzerError::export("canvas cast failed"))?;
    canvas.set_width(snapshot.width);
    canvas.set_height(snapshot.height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| AnalyzerError::export("canvas context unavailable"))?
        .ok_or_else(|| AnalyzerError::export("canvas context missing"))?
        .dyn_into()
        .map_err(|_| AnalyzerError::export("context cast failed"))?;

    let image = HtmlImageElement::new().map_err(|_| AnalyzerError::export("unable to create image"))?;
    image.set_src(&url);
    let decoded = JsFuture::from(image.decode()).await;
    if decoded.is_err() {
        Url::revoke_object_url(&url).ok();
        return Err(AnalyzerError::export("image decode failed"));
    }

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| AnalyzerError::export("unable to draw image"))?;

    let data_url = canvas
        .to_data_url_with_type(PNG_MIME)
        .map_err(|_| AnalyzerError::export("unable to serialise canvas"))?;
    Url::revoke_object_url(&url).ok();

    let payload = data_url
        .split(',')
        .nth(1)
        .ok_or_else(|| AnalyzerError::export("malformed data URL"))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| AnalyzerError::export("PNG decode failed"))
}

#[cfg(not(target_arch = "wasm32"))]
fn build_png_desktop(snapshot: &Snapshot) -> Result<Vec<u8>> {
    use resvg::{tiny_skia, usvg};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&snapshot.svg, &options)
        .map_err(|err| AnalyzerError::export(format!("invalid snapshot svg: {err}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| AnalyzerError::export("snapshot has no area"))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    let mut buffer = Vec::new();
    {
        let export = |err: png::EncodingError| AnalyzerError::export(err.to_string());
        let mut encoder = png::Encoder::new(&mut buffer, size.width(), size.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(export)?
            .write_image_data(&rgba)
            .map_err(export)?;
    }

    Ok(buffer)
}
