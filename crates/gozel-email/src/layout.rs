use crate::error::{Error, Result};
use std::{fmt, str::FromStr};

/// HTML and plain text templates of one layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutTemplatePair {
    pub html: &'static str,
    pub plain: &'static str,
}

const SIMPLE: LayoutTemplatePair = LayoutTemplatePair {
    html: include_str!("../layouts/simple.html"),
    plain: include_str!("../layouts/simple.txt"),
};

/// Layouts shipped with the crate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Simple,
}

impl Layout {
    pub const ALL: &'static [Self] = &[Self::Simple];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
        }
    }

    #[must_use]
    pub const fn templates(self) -> LayoutTemplatePair {
        match self {
            Self::Simple => SIMPLE,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|layout| layout.name() == s)
            .ok_or_else(|| Error::LayoutNotFound(s.to_owned()))
    }
}

/// Look up the templates of a layout by its name
pub fn lookup(name: &str) -> Result<LayoutTemplatePair> {
    name.parse::<Layout>().map(Layout::templates)
}

#[cfg(test)]
mod test {
    use super::{lookup, Layout};
    use crate::{error::Error, template::LayoutTag};

    #[test]
    fn lookup_simple() {
        let pair = lookup("simple").unwrap();
        assert_eq!(pair, Layout::Simple.templates());
        assert_eq!(Layout::default(), Layout::Simple);
    }

    #[test]
    fn lookup_unknown() {
        assert!(matches!(
            lookup("fancy"),
            Err(Error::LayoutNotFound(ref name)) if name == "fancy"
        ));
    }

    #[test]
    fn templates_share_vocabulary() {
        for layout in Layout::ALL {
            let pair = layout.templates();
            for tag in LayoutTag::ALL {
                let placeholder = format!("{{{{{}}}}}", tag.as_str());
                assert!(pair.html.contains(&placeholder), "{layout} html: {tag:?}");
                assert!(pair.plain.contains(&placeholder), "{layout} plain: {tag:?}");
            }
        }
    }
}
