use crate::plain_text::plain_text;
use crate::styles::{px, resolve, Declarations, FRAME_PROPERTIES};
use blockmail_model::defaults::{
    DEFAULT_BUTTON_COLOR, DEFAULT_BUTTON_RADIUS, DEFAULT_DIVIDER_THICKNESS, DEFAULT_LOGO_WIDTH,
    DEFAULT_SPACER_HEIGHT,
};
use blockmail_model::{AssetCatalog, Block, BlockData, GlobalSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Options for HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Contents of the `<title>` element
    pub title: String,
    /// Resolved asset URLs; unresolved references render as a placeholder
    pub assets: AssetCatalog,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: String::new(),
            assets: AssetCatalog::default(),
        }
    }
}

/// Rendered markup and its plain-text alternative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub html: String,
    pub plain_text: String,
    /// Blocks that were rendered as a placeholder
    pub faults: Vec<RenderFault>,
}

/// A block the renderer could not interpret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFault {
    pub block_id: String,
    pub type_name: String,
}

/// Class on the content column, widened to 100% below the breakpoint
pub const CONTAINER_CLASS: &str = "bm-container";
/// Class on every block cell
pub const BLOCK_CLASS: &str = "bm-block";
/// Class on images that scale down on narrow screens
pub const FLUID_CLASS: &str = "bm-fluid";

/// Headline sizes above this do not grow the subheadline
const SUBHEADLINE_BASE_CAP: u32 = 96;

struct Context<'a> {
    options: &'a RenderOptions,
    settings: &'a GlobalSettings,
    depth: usize,
    buffer: String,
    faults: Vec<RenderFault>,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions, settings: &'a GlobalSettings) -> Self {
        Self {
            options,
            settings,
            depth: 0,
            buffer: String::new(),
            faults: Vec::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}

/// Render a document with default options
pub fn render(blocks: &[Block], settings: &GlobalSettings) -> RenderOutput {
    render_with_options(blocks, settings, &RenderOptions::default())
}

/// Render a document to table-based HTML plus plain text.
///
/// Never fails: a block that cannot be interpreted becomes a visible
/// placeholder row and is reported in [`RenderOutput::faults`].
#[instrument(skip_all, fields(blocks = blocks.len()))]
pub fn render_with_options(blocks: &[Block], settings: &GlobalSettings, options: &RenderOptions) -> RenderOutput {
    let mut ctx = Context::new(options, settings);

    ctx.add_line(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#);
    ctx.add_line(r#"<html xmlns="http://www.w3.org/1999/xhtml">"#);
    ctx.indent();

    compile_head(&mut ctx);

    ctx.add_line(&format!(
        r#"<body style="margin: 0; padding: 0; background-color: {};">"#,
        escape_html(&settings.background_color)
    ));
    ctx.indent();
    open_layout(&mut ctx);

    for block in blocks {
        compile_block(block, &mut ctx);
    }

    close_layout(&mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    if !ctx.faults.is_empty() {
        warn!(faults = ctx.faults.len(), "Rendered placeholders for unsupported blocks");
    }
    debug!(bytes = ctx.buffer.len(), "Render complete");

    RenderOutput {
        html: ctx.buffer,
        plain_text: plain_text(blocks),
        faults: ctx.faults,
    }
}

fn compile_head(ctx: &mut Context) {
    let breakpoint = ctx.settings.mobile_breakpoint;

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line(r#"<meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />"#);
    ctx.add_line(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0" />"#);
    ctx.add_line(&format!("<title>{}</title>", escape_html(&ctx.options.title)));
    ctx.add_line(r#"<style type="text/css">"#);
    ctx.indent();
    ctx.add_line(&format!("@media only screen and (max-width: {}px) {{", breakpoint));
    ctx.indent();
    ctx.add_line(&format!(
        ".{} {{ width: 100% !important; max-width: 100% !important; }}",
        CONTAINER_CLASS
    ));
    ctx.add_line(&format!(
        ".{} {{ padding-left: 16px !important; padding-right: 16px !important; }}",
        BLOCK_CLASS
    ));
    ctx.add_line(&format!(
        ".{} {{ width: 100% !important; height: auto !important; }}",
        FLUID_CLASS
    ));
    ctx.dedent();
    ctx.add_line("}");
    ctx.dedent();
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");
}

fn open_layout(ctx: &mut Context) {
    let settings = ctx.settings;
    ctx.add_line(&format!(
        r#"<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" bgcolor="{bg}" style="background-color: {bg};">"#,
        bg = escape_html(&settings.background_color)
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line(r#"<td align="center" style="padding: 0;">"#);
    ctx.indent();
    ctx.add_line(&format!(
        r#"<table role="presentation" class="{class}" width="{width}" cellpadding="0" cellspacing="0" border="0" bgcolor="{bg}" style="width: {width}px; max-width: {width}px; background-color: {bg};">"#,
        class = CONTAINER_CLASS,
        width = settings.max_width,
        bg = escape_html(&settings.content_background_color)
    ));
    ctx.indent();
}

fn close_layout(ctx: &mut Context) {
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
}

/// Emit one `<tr>` for a block
fn compile_block(block: &Block, ctx: &mut Context) {
    let Some(kind) = block.kind() else {
        compile_placeholder(block, ctx);
        return;
    };

    let style = resolve(kind, &block.data, ctx.settings);
    let mut cell = style.only(FRAME_PROPERTIES).with("font-family", ctx.settings.font_family.clone());
    let align = style.get("text-align").unwrap_or("left").to_string();

    if let BlockData::Spacer { settings, .. } = &block.data {
        let height = settings.height.unwrap_or(DEFAULT_SPACER_HEIGHT);
        cell.set("height", px(height));
        cell.set("line-height", px(height));
        cell.set("font-size", "0");
    }

    open_cell(ctx, block, &align, &cell);

    let text = style.without(FRAME_PROPERTIES);
    match &block.data {
        BlockData::Logo { content, settings } => {
            let width = settings.width.unwrap_or(DEFAULT_LOGO_WIDTH);
            let img = image_tag(ctx, &content.src, &content.alt, width, false);
            link_wrapped(ctx, content.link.as_deref(), &img);
        }
        BlockData::Spacer { .. } => ctx.add_line("&nbsp;"),
        BlockData::Hero { content, .. } => {
            if let Some(image) = &content.image {
                let img = image_tag(ctx, image, &content.headline, ctx.settings.max_width, true);
                ctx.add_line(&img);
            }
            let headline = text.clone().with("margin", "0");
            ctx.add_line(&format!(
                r#"<h1 style="{}">{}</h1>"#,
                style_attr(&headline),
                text_html(&content.headline)
            ));
            if let Some(sub) = &content.subheadline {
                let sub_size = subheadline_size(text_size(&text).unwrap_or(32));
                let sub_style = text
                    .clone()
                    .with("margin", "12px 0 0")
                    .with("font-size", px(sub_size))
                    .with("line-height", px(sub_size + 8))
                    .with("font-weight", "400");
                ctx.add_line(&format!(r#"<p style="{}">{}</p>"#, style_attr(&sub_style), text_html(sub)));
            }
            if let (Some(label), Some(url)) = (&content.button_label, &content.button_url) {
                let anchor = Declarations::new()
                    .with("font-family", ctx.settings.font_family.clone())
                    .with("font-size", "16px")
                    .with("font-weight", "700")
                    .with("color", "#ffffff");
                compile_button(ctx, label, url, &align, DEFAULT_BUTTON_COLOR, DEFAULT_BUTTON_RADIUS, &anchor, "24px 0 0");
            }
        }
        BlockData::Heading { content, .. } => {
            let heading = text.clone().with("margin", "0");
            ctx.add_line(&format!(
                r#"<h{level} style="{style}">{body}</h{level}>"#,
                level = content.level,
                style = style_attr(&heading),
                body = text_html(&content.text)
            ));
        }
        BlockData::Text { content, .. } => {
            let paragraphs: Vec<&str> = content
                .body
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            let count = paragraphs.len();
            for (i, paragraph) in paragraphs.into_iter().enumerate() {
                let margin = if i + 1 == count { "0" } else { "0 0 16px" };
                let p = text.clone().with("margin", margin);
                ctx.add_line(&format!(r#"<p style="{}">{}</p>"#, style_attr(&p), text_html(paragraph)));
            }
        }
        BlockData::Button { content, settings } => {
            let color = settings.button_color.as_deref().unwrap_or(DEFAULT_BUTTON_COLOR);
            let radius = settings.border_radius.unwrap_or(DEFAULT_BUTTON_RADIUS);
            compile_button(ctx, &content.label, &content.url, &align, color, radius, &text, "0");
        }
        BlockData::Image { content, settings } => {
            let width = settings.width.unwrap_or(ctx.settings.max_width).min(ctx.settings.max_width);
            let img = image_tag(ctx, &content.src, &content.alt, width, true);
            link_wrapped(ctx, content.link.as_deref(), &img);
        }
        BlockData::Divider { settings, .. } => {
            let color = settings
                .color
                .clone()
                .or_else(|| text.get("color").map(str::to_string))
                .unwrap_or_else(|| "#e0e0e0".to_string());
            let thickness = settings.thickness.unwrap_or(DEFAULT_DIVIDER_THICKNESS);
            ctx.add_line(r#"<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0">"#);
            ctx.indent();
            ctx.add_line(&format!(
                r#"<tr><td style="border-top: {}px solid {}; font-size: 0; line-height: 0;">&nbsp;</td></tr>"#,
                thickness,
                escape_html(&color)
            ));
            ctx.dedent();
            ctx.add_line("</table>");
        }
        BlockData::Footer { content, .. } => {
            let p = text.clone().with("margin", "0");
            ctx.add_line(&format!(r#"<p style="{}">{}</p>"#, style_attr(&p), text_html(&content.text)));
            if let Some(address) = &content.address {
                let p = text.clone().with("margin", "8px 0 0");
                ctx.add_line(&format!(r#"<p style="{}">{}</p>"#, style_attr(&p), text_html(address)));
            }
            if let Some(url) = &content.unsubscribe_url {
                let p = text.clone().with("margin", "8px 0 0");
                let link_color = text.get("color").unwrap_or("#888888").to_string();
                ctx.add_line(&format!(
                    r#"<p style="{}"><a href="{}" target="_blank" style="color: {}; text-decoration: underline;">Unsubscribe</a></p>"#,
                    style_attr(&p),
                    escape_html(&safe_url(url)),
                    escape_html(&link_color)
                ));
            }
        }
        BlockData::Unsupported { .. } => {}
    }

    close_cell(ctx);
}

/// Visible stand-in for a block this build cannot interpret
fn compile_placeholder(block: &Block, ctx: &mut Context) {
    let type_name = block.data.type_name().to_string();
    ctx.faults.push(RenderFault {
        block_id: block.id.clone(),
        type_name: type_name.clone(),
    });

    let cell = Declarations::new()
        .with("padding", "12px 32px")
        .with("background-color", "#fff4e5")
        .with("text-align", "center")
        .with("font-family", ctx.settings.font_family.clone())
        .with("font-size", "13px")
        .with("color", "#8a4b00");

    ctx.add_line(&format!("<!-- unsupported block: {} -->", escape_comment(&type_name)));
    open_cell(ctx, block, "center", &cell);
    ctx.add_line(&format!("Unsupported block: {}", escape_html(&type_name)));
    close_cell(ctx);
}

fn open_cell(ctx: &mut Context, block: &Block, align: &str, cell: &Declarations) {
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line(&format!(
        r#"<td class="{}" data-block-id="{}" align="{}" style="{}">"#,
        BLOCK_CLASS,
        escape_html(&block.id),
        escape_html(align),
        style_attr(cell)
    ));
    ctx.indent();
}

fn close_cell(ctx: &mut Context) {
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
}

fn image_tag(ctx: &Context, src: &str, alt: &str, width: u32, fluid: bool) -> String {
    let url = ctx.options.assets.url_for(src);
    let mut style = Declarations::new()
        .with("display", "block")
        .with("border", "0")
        .with("outline", "none")
        .with("text-decoration", "none")
        .with("height", "auto");
    if fluid {
        style.set("width", "100%");
        style.set("max-width", px(width));
    } else {
        style.set("width", px(width));
    }
    let class = if fluid {
        format!(r#" class="{}""#, FLUID_CLASS)
    } else {
        String::new()
    };
    format!(
        r#"<img src="{}" alt="{}" width="{}"{} style="{}" />"#,
        escape_html(&url),
        escape_html(alt),
        width,
        class,
        style_attr(&style)
    )
}

fn link_wrapped(ctx: &mut Context, link: Option<&str>, inner: &str) {
    match link {
        Some(href) => ctx.add_line(&format!(
            r#"<a href="{}" target="_blank">{}</a>"#,
            escape_html(&safe_url(href)),
            inner
        )),
        None => ctx.add_line(inner),
    }
}

/// Bulletproof button: a one-cell table carrying the background colour
#[allow(clippy::too_many_arguments)]
fn compile_button(
    ctx: &mut Context,
    label: &str,
    url: &str,
    align: &str,
    color: &str,
    radius: u32,
    text: &Declarations,
    margin: &str,
) {
    let anchor = text
        .clone()
        .with("display", "inline-block")
        .with("padding", "12px 24px")
        .with("text-decoration", "none")
        .with("border-radius", px(radius));
    ctx.add_line(&format!(
        r#"<table role="presentation" cellpadding="0" cellspacing="0" border="0" align="{}" style="margin: {};">"#,
        escape_html(align),
        margin
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line(&format!(
        r#"<td bgcolor="{c}" style="border-radius: {r}px; background-color: {c};">"#,
        c = escape_html(color),
        r = radius
    ));
    ctx.indent();
    ctx.add_line(&format!(
        r#"<a href="{}" target="_blank" style="{}">{}</a>"#,
        escape_html(&safe_url(url)),
        style_attr(&anchor),
        escape_html(label)
    ));
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
}

fn style_attr(style: &Declarations) -> String {
    escape_html(&style.to_inline())
}

/// Subheadline size scaled from the headline, kept within 14..=54px
fn subheadline_size(headline: u32) -> u32 {
    (headline.min(SUBHEADLINE_BASE_CAP) * 9 / 16).max(14)
}

fn text_size(style: &Declarations) -> Option<u32> {
    style.get("font-size")?.trim_end_matches("px").parse().ok()
}

/// Escaped text with single newlines as `<br />`
fn text_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br />")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn escape_comment(text: &str) -> String {
    text.replace("--", "- -")
}

/// Refuse script URLs; everything else passes through
fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if trimmed.is_empty() || lower.starts_with("javascript:") || lower.starts_with("vbscript:") {
        "#".to_string()
    } else {
        trimmed.to_string()
    }
}

impl RenderOutput {
    /// Whether the block was replaced by a placeholder
    pub fn has_fault_for(&self, block_id: &str) -> bool {
        self.faults.iter().any(|fault| fault.block_id == block_id)
    }
}
