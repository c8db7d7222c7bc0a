use crate::{
    layout::{Layout, LayoutTemplatePair},
    template::{self, LayoutTag, TagValues},
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

pub const DEFAULT_COPYRIGHT_TEXT: &str = "All rights reserved.";

const TITLE_STYLE: &str = "margin-top: 0; color: #333333; font-size: 22px; font-weight: bold; text-align: left;";
const TEXT_STYLE: &str = "font-size: 16px; line-height: 1.625; color: #333; margin: .4em 0 1.1875em;";
const CELL_STYLE: &str = "word-break: break-word; font-family: &quot;Nunito Sans&quot;, Helvetica, Arial, sans-serif; font-size: 16px;";
const BUTTON_STYLE: &str = "color: #FFF; background-color: #3869D4; display: inline-block; text-decoration: none; border-radius: 3px; box-shadow: 0 2px 3px rgba(0, 0, 0, 0.16); -webkit-text-size-adjust: none; box-sizing: border-box; border-color: #3869D4; border-style: solid; border-width: 10px 18px;";

/// Logo shown in place of the product name
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize, TypedBuilder)]
pub struct ProductImage {
    /// Used as the alternative text of the image
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ProductImage {
    fn to_html(&self) -> String {
        format!(
            r#"<img src="{}" width="{}" height="{}" alt="{}" />"#,
            self.url, self.width, self.height, self.name
        )
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductName {
    Text(String),
    Image(ProductImage),
}

impl From<&str> for ProductName {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ProductName {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ProductImage> for ProductName {
    fn from(value: ProductImage) -> Self {
        Self::Image(value)
    }
}

/// One piece of content, rendered for both formats at once
#[derive(Clone, Debug)]
struct Block {
    html: String,
    plain: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Html,
    Plain,
}

impl Format {
    fn select(self, block: &Block) -> &str {
        match self {
            Self::Html => &block.html,
            Self::Plain => &block.plain,
        }
    }

    fn template(self, layout: &LayoutTemplatePair) -> &'static str {
        match self {
            Self::Html => layout.html,
            Self::Plain => layout.plain,
        }
    }
}

/// Accumulates the blocks of one email and renders its HTML and plain text bodies
///
/// Blocks render in the order they were added. Rendering leaves the composer untouched,
/// so both bodies can be produced any number of times.
#[derive(Clone, Debug)]
pub struct Composer {
    layout: LayoutTemplatePair,
    content: Vec<Block>,
    footer: Vec<Block>,
    tag_values: TagValues,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(Layout::default().templates())
    }
}

impl Composer {
    #[must_use]
    pub fn new(layout: LayoutTemplatePair) -> Self {
        Self {
            layout,
            content: Vec::new(),
            footer: Vec::new(),
            tag_values: TagValues::default(),
        }
    }

    /// Set the product shown in the header. Replaces any previously set product.
    ///
    /// An image is stored as `<img>` markup, which is also what the plain text body shows.
    pub fn set_product<N>(&mut self, name: N, url: impl Into<String>) -> &mut Self
    where
        N: Into<ProductName>,
    {
        self.tag_values.set(LayoutTag::ProductUrl, url);

        let name = match name.into() {
            ProductName::Text(text) => text,
            ProductName::Image(image) => image.to_html(),
        };
        self.tag_values.set(LayoutTag::ProductName, name);

        self
    }

    pub fn add_title(&mut self, title: impl Display) -> &mut Self {
        self.push_content(
            format!(r#"<h1 style="{TITLE_STYLE}" align="left">{title}</h1>"#),
            title.to_string(),
        )
    }

    pub fn add_text(&mut self, text: impl Display) -> &mut Self {
        self.push_content(
            format!(r#"<p style="{TEXT_STYLE}">{text}</p>"#),
            text.to_string(),
        )
    }

    pub fn add_button(&mut self, text: impl Display, url: impl Display) -> &mut Self {
        let html = format!(
            concat!(
                r#"<table class="body-action" align="center" width="100%" cellpadding="0" cellspacing="0" role="presentation" style="width: 100%; -premailer-width: 100%; -premailer-cellpadding: 0; -premailer-cellspacing: 0; text-align: center; margin: 30px auto; padding: 0;">"#,
                r#"<tr><td align="center" style="{cell}">"#,
                r#"<table width="100%" border="0" cellspacing="0" cellpadding="0" role="presentation">"#,
                r#"<tr><td align="center" style="{cell}">"#,
                r#"<a href="{url}" class="f-fallback button" target="_blank" style="{button}">{text}</a>"#,
                "</td></tr></table></td></tr></table>",
            ),
            cell = CELL_STYLE,
            button = BUTTON_STYLE,
            url = url,
            text = text,
        );

        self.push_content(html, format!("{text}: {url}"))
    }

    /// Add a table of key/value pairs, one row per pair in iteration order
    pub fn add_inlined_key_value_set<I, K, V>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        let mut html = format!(
            concat!(
                r#"<table class="attributes" width="100%" cellpadding="0" cellspacing="0" role="presentation" style="margin: 0 0 21px;">"#,
                r##"<tr><td class="attributes_content" style="{cell} background-color: #F4F4F7; padding: 16px;" bgcolor="#F4F4F7">"##,
                r#"<table width="100%" cellpadding="0" cellspacing="0" role="presentation">"#,
            ),
            cell = CELL_STYLE,
        );
        let mut lines = Vec::new();

        for (key, value) in items {
            // Writing into a `String` is infallible
            let _ = write!(
                html,
                r#"<tr><td class="attributes_item" style="{CELL_STYLE} padding: 0;"><span class="f-fallback"><strong>{key}</strong> {value}</span></td></tr>"#,
            );
            lines.push(format!("{key}: {value}"));
        }
        html.push_str("</table></td></tr></table>");

        self.push_content(html, lines.join(LINE_SEPARATOR))
    }

    pub fn add_footer_text(&mut self, text: impl Display) -> &mut Self {
        self.footer.push(Block {
            html: format!(r#"<p class="f-fallback sub align-center">{text}</p>"#),
            plain: text.to_string(),
        });

        self
    }

    /// Add a `© <year> <product name>. <text>` footer line
    ///
    /// Uses the product name set at the time of the call, whatever it contains.
    pub fn add_copyright_text(&mut self, text: Option<&str>) -> &mut Self {
        let line = format!(
            "© {} {}. {}",
            OffsetDateTime::now_utc().year(),
            self.tag_values.get(LayoutTag::ProductName),
            text.unwrap_or(DEFAULT_COPYRIGHT_TEXT),
        );

        self.add_footer_text(line)
    }

    #[must_use]
    pub fn html_email(&self) -> String {
        self.render(Format::Html)
    }

    #[must_use]
    pub fn plain_email(&self) -> String {
        self.render(Format::Plain)
    }

    fn push_content(&mut self, html: String, plain: String) -> &mut Self {
        self.content.push(Block { html, plain });
        self
    }

    fn render(&self, format: Format) -> String {
        let mut tag_values = self.tag_values.clone();
        tag_values.set(LayoutTag::Content, join(&self.content, format));
        tag_values.set(LayoutTag::Footer, join(&self.footer, format));

        template::substitute(format.template(&self.layout), &tag_values)
    }
}

fn join(blocks: &[Block], format: Format) -> String {
    blocks
        .iter()
        .map(|block| format.select(block))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

#[cfg(test)]
mod test {
    use super::{Composer, ProductImage, LINE_SEPARATOR};
    use time::OffsetDateTime;

    #[test]
    fn set_product_overwrites() {
        let mut composer = Composer::default();
        composer
            .set_product("First", "https://first.example")
            .set_product("Second", "https://second.example");

        let plain = composer.plain_email();
        assert!(plain.contains("Second (https://second.example)"));
        assert!(!plain.contains("First"));
    }

    #[test]
    fn product_image() {
        let image = ProductImage::builder()
            .name("Acme")
            .url("https://acme.example/logo.png")
            .width(120)
            .height(40)
            .build();

        let mut composer = Composer::default();
        composer.set_product(image, "https://acme.example");

        let markup =
            r#"<img src="https://acme.example/logo.png" width="120" height="40" alt="Acme" />"#;
        assert!(composer.html_email().contains(markup));
        assert!(composer.plain_email().contains(markup));
    }

    #[test]
    fn button() {
        let mut composer = Composer::default();
        composer.add_button("Confirm", "https://acme.example/confirm");

        assert!(composer
            .plain_email()
            .contains("Confirm: https://acme.example/confirm"));
        assert!(composer
            .html_email()
            .contains(r#"<a href="https://acme.example/confirm" class="f-fallback button""#));
    }

    #[test]
    fn key_value_join() {
        let mut composer = Composer::default();
        composer.add_inlined_key_value_set([("a", "1"), ("b", "2")]);

        let plain = composer.plain_email();
        assert!(plain.contains(&format!("a: 1{LINE_SEPARATOR}b: 2")));
        assert!(!plain.contains(&format!("b: 2{LINE_SEPARATOR}{LINE_SEPARATOR}")));

        let html = composer.html_email();
        assert!(html.contains("<strong>a</strong> 1"));
        assert!(html.contains("<strong>b</strong> 2"));
    }

    #[test]
    fn empty_key_value_set() {
        let mut composer = Composer::default();
        composer.add_inlined_key_value_set(Vec::<(String, String)>::new());

        assert_eq!(composer.content.len(), 1);
        assert_eq!(composer.content[0].plain, "");
        assert!(composer.content[0].html.ends_with(
            r#"<table width="100%" cellpadding="0" cellspacing="0" role="presentation"></table></td></tr></table>"#
        ));
    }

    #[test]
    fn copyright() {
        let mut composer = Composer::default();
        composer
            .set_product("Acme", "https://acme.example")
            .add_copyright_text(None)
            .add_copyright_text(Some("Some rights reserved."));

        let year = OffsetDateTime::now_utc().year();
        let plain = composer.plain_email();
        assert!(plain.contains(&format!("© {year} Acme. All rights reserved.")));
        assert!(plain.contains(&format!("© {year} Acme. Some rights reserved.")));
        assert!(composer
            .html_email()
            .contains(r#"<p class="f-fallback sub align-center">©"#));
    }

    #[test]
    fn render_is_idempotent() {
        let mut composer = Composer::default();
        composer.add_title("Title").add_footer_text("Footer");

        assert_eq!(composer.html_email(), composer.html_email());
        assert_eq!(composer.plain_email(), composer.plain_email());
        assert_eq!(composer.content.len(), 1);
        assert_eq!(composer.footer.len(), 1);
    }

    #[test]
    fn empty_composer_renders_layout() {
        let composer = Composer::default();

        for output in [composer.html_email(), composer.plain_email()] {
            assert!(!output.contains("{{"));
            assert!(!output.contains("}}"));
        }
    }
}
