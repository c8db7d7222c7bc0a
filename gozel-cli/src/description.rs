use gozel_email::{Composer, ProductName};
use serde::Deserialize;

/// JSON description of an email, turned into composer calls
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailDescription {
    pub product: Option<Product>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub footer: Vec<FooterBlock>,
}

#[derive(Debug, Deserialize)]
pub struct Product {
    pub name: ProductName,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentBlock {
    Title { text: String },
    Text { text: String },
    Button { text: String, url: String },
    KeyValue { items: Vec<(String, String)> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FooterBlock {
    Text { text: String },
    Copyright { text: Option<String> },
}

impl EmailDescription {
    pub fn compose(self, composer: &mut Composer) {
        if let Some(product) = self.product {
            composer.set_product(product.name, product.url);
        }

        for block in self.blocks {
            match block {
                ContentBlock::Title { text } => composer.add_title(text),
                ContentBlock::Text { text } => composer.add_text(text),
                ContentBlock::Button { text, url } => composer.add_button(text, url),
                ContentBlock::KeyValue { items } => composer.add_inlined_key_value_set(items),
            };
        }

        for block in self.footer {
            match block {
                FooterBlock::Text { text } => composer.add_footer_text(text),
                FooterBlock::Copyright { text } => composer.add_copyright_text(text.as_deref()),
            };
        }
    }
}
