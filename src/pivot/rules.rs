/*! Field lookup rules

Each field of an article is described by an ordered list of [Locator]s,
evaluated top to bottom, and a [Requirement] telling what to do when none of them yields anything.

Supporting a new export template means adding a locator to a rule, not a new branch in the extractor.
!*/
use scraper::{ElementRef, Selector};

use crate::error::Error;

/// compile a css selector, keeping the faulty selector in the error.
pub fn selector(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e:?}")))
}

/// Collect the text of an element, like a DOM `textContent`, and trim it.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Where to find an element, relative to a scope element.
pub enum Locator {
    /// first descendant matching the selector.
    Descendant(Selector),
    /// first descendant matching `anchor`, then its first following sibling named `tag`.
    FollowingSibling { anchor: Selector, tag: &'static str },
    /// the scope element itself.
    Scope,
}

impl Locator {
    pub fn descendant(css: &str) -> Result<Self, Error> {
        Ok(Locator::Descendant(selector(css)?))
    }

    pub fn following_sibling(anchor: &str, tag: &'static str) -> Result<Self, Error> {
        Ok(Locator::FollowingSibling {
            anchor: selector(anchor)?,
            tag,
        })
    }

    pub fn locate<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            Locator::Descendant(sel) => scope.select(sel).next(),
            Locator::FollowingSibling { anchor, tag } => {
                let anchor = scope.select(anchor).next()?;
                next_sibling_named(anchor, tag)
            }
            Locator::Scope => Some(scope),
        }
    }
}

/// first following sibling element with the provided tag name.
pub fn next_sibling_named<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

/// What happens when no locator of a rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// the article is rejected with an error carrying this tag.
    Required(&'static str),
    /// the field is left empty.
    Optional,
    /// the article is silently skipped.
    SkipArticle,
}

/// Ordered locators for a single field.
pub struct FieldRule {
    pub locators: Vec<Locator>,
    pub requirement: Requirement,
}

impl FieldRule {
    pub fn new(locators: Vec<Locator>, requirement: Requirement) -> Self {
        Self {
            locators,
            requirement,
        }
    }

    /// first element found by any locator.
    pub fn find_element<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.locators.iter().find_map(|l| l.locate(scope))
    }

    /// first non-empty text found by any locator.
    pub fn find_text(&self, scope: ElementRef) -> Option<String> {
        self.locators
            .iter()
            .filter_map(|l| l.locate(scope))
            .map(text_of)
            .find(|text| !text.is_empty())
    }
}

/// The author sits right after the title container,
/// in a sibling carrying exactly the expected class.
pub struct AuthorRule {
    pub tag: &'static str,
    pub class: &'static str,
}

impl AuthorRule {
    pub fn find(&self, title_container: ElementRef) -> Option<String> {
        let sibling = next_sibling_named(title_container, self.tag)?;
        let mut classes = sibling.value().classes();
        match (classes.next(), classes.next()) {
            (Some(class), None) if class == self.class => {
                Some(text_of(sibling).to_lowercase()).filter(|a| !a.is_empty())
            }
            _ => None,
        }
    }
}

/// Lookup rules for every field of an article.
///
/// `title`, `bottom_news` and `subtitle` are evaluated inside the title container,
/// every other rule inside the `<article>` element.
pub struct Rules {
    pub article: Selector,
    pub journal: FieldRule,
    pub header: FieldRule,
    pub sub_section: FieldRule,
    pub title_container: FieldRule,
    pub title: FieldRule,
    pub bottom_news: FieldRule,
    pub subtitle: FieldRule,
    pub text: FieldRule,
    pub author: AuthorRule,
}

impl Rules {
    /// Rules matching the Europresse HTML exports.
    pub fn europresse() -> Result<Self, Error> {
        use Requirement::*;

        Ok(Self {
            article: selector("article")?,
            journal: FieldRule::new(
                vec![Locator::descendant("span.DocPublicationName")?],
                Required("journal"),
            ),
            header: FieldRule::new(vec![Locator::descendant("span.DocHeader")?], Optional),
            sub_section: FieldRule::new(
                vec![Locator::following_sibling("span.DocTitreSousSection", "span")?],
                Optional,
            ),
            title_container: FieldRule::new(
                vec![
                    Locator::descendant("div.titreArticle")?,
                    Locator::descendant("p.titreArticleVisu")?,
                ],
                Required("title"),
            ),
            title: FieldRule::new(
                vec![
                    Locator::descendant("p.sm-margin-TopNews.titreArticleVisu.rdp__articletitle")?,
                    Locator::descendant("div.titreArticleVisu")?,
                    Locator::Scope,
                ],
                Required("title"),
            ),
            bottom_news: FieldRule::new(
                vec![Locator::descendant("p.sm-margin-bottomNews")?],
                Optional,
            ),
            subtitle: FieldRule::new(
                vec![Locator::descendant("p.sm-margin-TopNews.rdp__subtitle")?],
                Optional,
            ),
            text: FieldRule::new(
                vec![
                    Locator::descendant("div.docOcurrContainer")?,
                    Locator::descendant("div.DocText.clearfix")?,
                ],
                SkipArticle,
            ),
            author: AuthorRule {
                tag: "p",
                class: "sm-margin-bottomNews",
            },
        })
    }
}
