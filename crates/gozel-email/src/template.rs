//! `{{tag}}` placeholder substitution over layout templates
//!
//! Templates are scanned once, left to right. Every placeholder is the shortest span
//! from a `{{` opener to the next `}}` closer. The output is rebuilt from the recorded
//! spans, so substituted values are never scanned again.

use std::ops::Range;

const OPENER: &str = "{{";
const CLOSER: &str = "}}";

/// Tags understood by the layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutTag {
    ProductName,
    ProductUrl,
    Content,
    Footer,
}

impl LayoutTag {
    pub const ALL: [Self; 4] = [
        Self::ProductName,
        Self::ProductUrl,
        Self::Content,
        Self::Footer,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductName => "product_name",
            Self::ProductUrl => "product_url",
            Self::Content => "content",
            Self::Footer => "footer",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}

/// Current value of every layout tag
///
/// Lookups are total. Unset tags and unknown tag names resolve to the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagValues {
    values: [String; LayoutTag::ALL.len()],
}

impl TagValues {
    #[must_use]
    pub fn get(&self, tag: LayoutTag) -> &str {
        &self.values[tag as usize]
    }

    pub fn set(&mut self, tag: LayoutTag, value: impl Into<String>) {
        self.values[tag as usize] = value.into();
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> &str {
        LayoutTag::from_name(name).map_or("", |tag| self.get(tag))
    }
}

/// One `{{name}}` occurrence inside a template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Byte range of the whole placeholder, delimiters included
    pub span: Range<usize>,
    pub name: &'a str,
}

/// Iterator over the placeholders of a template
pub struct Placeholders<'a> {
    template: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.cursor + self.template[self.cursor..].find(OPENER)?;
            let name_start = start + OPENER.len();
            let name_end = name_start + self.template[name_start..].find(CLOSER)?;
            let name = &self.template[name_start..name_end];

            // Placeholders never span lines. Retry from the next character.
            if name.contains('\n') {
                self.cursor = start + 1;
                continue;
            }

            let end = name_end + CLOSER.len();
            self.cursor = end;

            return Some(Placeholder {
                span: start..end,
                name,
            });
        }
    }
}

#[must_use]
pub fn placeholders(template: &str) -> Placeholders<'_> {
    Placeholders {
        template,
        cursor: 0,
    }
}

/// Replace every placeholder of the template with its tag value
#[must_use]
pub fn substitute(template: &str, values: &TagValues) -> String {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for placeholder in placeholders(template) {
        output.push_str(&template[last..placeholder.span.start]);
        output.push_str(values.lookup(placeholder.name));
        last = placeholder.span.end;
    }

    output.push_str(&template[last..]);
    output
}
