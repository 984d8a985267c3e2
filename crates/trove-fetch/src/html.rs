//! HTML article extraction
//!
//! Runs a chain of selector strategies over a parsed page. The first
//! strategy whose cleaned text exceeds the threshold wins; otherwise the
//! longest candidate is returned and the caller judges it.

use crate::clean::clean_text;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text is never extracted
pub const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "button", "svg",
    "iframe",
];

/// Page chrome that disqualifies any candidate nested inside it.
/// `form` and `button` are absent: whole pages are often wrapped in a form.
const CHROME_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "svg", "iframe",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4",
    "h5", "h6", "blockquote", "pre", "tr", "table", "figcaption", "dd", "dt",
];

const CMS_SELECTORS: &[&str] = &[
    "[itemprop='articleBody']",
    ".entry-content",
    ".post-content",
    ".article-content",
    ".article-body",
    ".post-body",
    ".story-body",
    ".td-post-content",
    ".single-post",
    "#article-body",
    "#content",
    ".content",
];

const ABSTRACT_SELECTORS: &[&str] = &[
    "#abstract",
    ".abstract",
    "section.abstract",
    ".ltx_abstract",
    "[role='doc-abstract']",
    "meta[name='citation_abstract']",
];

const ACADEMIC_BODY_SELECTORS: &[&str] = &[
    ".ltx_page_content",
    ".c-article-body",
    ".article__body",
    ".fulltext-view",
    "#body",
    ".paper-body",
];

/// Paragraphs shorter than this are treated as navigation crumbs
const MIN_PARAGRAPH_CHARS: usize = 40;

/// Which strategy produced the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `<article>`
    Article,
    /// `<main>` or `[role=main]`
    Main,
    /// Known CMS body classes
    CmsBody,
    /// Abstract plus body of a paper
    Academic,
    /// Every substantial paragraph
    Paragraphs,
}

impl Strategy {
    /// Evaluation order
    pub const CHAIN: [Strategy; 5] = [
        Strategy::Article,
        Strategy::Main,
        Strategy::CmsBody,
        Strategy::Academic,
        Strategy::Paragraphs,
    ];
}

/// Result of running the strategy chain
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// `og:title` or `<title>`, when present
    pub title: Option<String>,
    /// Cleaned article text (may be short or empty)
    pub text: String,
    /// Strategy that produced `text`; `None` when nothing matched
    pub strategy: Option<Strategy>,
}

/// Extract the readable text of an HTML page
///
/// # Examples
///
/// ```
/// use trove_fetch::html::{extract_page, Strategy};
///
/// let body = "Rust ownership explained in depth. ".repeat(20);
/// let html = format!("<html><body><nav>Home</nav><article><p>{}</p></article></body></html>", body);
/// let page = extract_page(&html, 300);
/// assert_eq!(page.strategy, Some(Strategy::Article));
/// assert!(!page.text.contains("Home"));
/// ```
pub fn extract_page(html: &str, strategy_min_chars: usize) -> PageText {
    let document = Html::parse_document(html);
    let title = page_title(&document);

    let mut best: Option<(Strategy, String)> = None;
    for strategy in Strategy::CHAIN {
        let text = run_strategy(&document, strategy);
        let len = text.chars().count();
        if len > strategy_min_chars {
            return PageText {
                title,
                text,
                strategy: Some(strategy),
            };
        }
        let longer = match &best {
            Some((_, current)) => len > current.chars().count(),
            None => len > 0,
        };
        if longer {
            best = Some((strategy, text));
        }
    }

    match best {
        Some((strategy, text)) => PageText {
            title,
            text,
            strategy: Some(strategy),
        },
        None => PageText {
            title,
            text: String::new(),
            strategy: None,
        },
    }
}

fn run_strategy(document: &Html, strategy: Strategy) -> String {
    match strategy {
        Strategy::Article => longest_match(document, &["article"]),
        Strategy::Main => longest_match(document, &["main", "[role='main']"]),
        Strategy::CmsBody => first_substantial(document, CMS_SELECTORS),
        Strategy::Academic => academic_text(document),
        Strategy::Paragraphs => paragraph_text(document),
    }
}

/// Page title, preferring `og:title`
pub fn page_title(document: &Html) -> Option<String> {
    let og = selector("meta[property='og:title']").and_then(|sel| {
        document
            .select(&sel)
            .filter_map(|el| el.value().attr("content"))
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
    });
    if og.is_some() {
        return og;
    }

    let sel = selector("title")?;
    document
        .select(&sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn longest_match(document: &Html, selectors: &[&str]) -> String {
    selectors
        .iter()
        .filter_map(|css| selector(css))
        .flat_map(|sel| {
            document
                .select(&sel)
                .filter(|el| !inside_skipped(el))
                .map(|el| element_text(&el))
                .collect::<Vec<_>>()
        })
        .max_by_key(|text| text.chars().count())
        .unwrap_or_default()
}

fn first_substantial(document: &Html, selectors: &[&str]) -> String {
    let mut longest = String::new();
    for css in selectors.iter().copied() {
        let text = longest_match(document, &[css]);
        if text.chars().count() > longest.chars().count() {
            longest = text;
        }
        if longest.chars().count() >= MIN_PARAGRAPH_CHARS * 5 {
            break;
        }
    }
    longest
}

fn academic_text(document: &Html) -> String {
    let abstract_text = ABSTRACT_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| {
            document.select(&sel).find_map(|el| {
                let text = match el.value().attr("content") {
                    Some(content) => clean_text(content),
                    None => element_text(&el),
                };
                (!text.is_empty()).then_some(text)
            })
        })
        .unwrap_or_default();

    let body_text = longest_match(document, ACADEMIC_BODY_SELECTORS);

    if body_text.contains(&abstract_text) {
        return body_text;
    }
    match (abstract_text.is_empty(), body_text.is_empty()) {
        (true, _) => body_text,
        (false, true) => abstract_text,
        (false, false) => format!("{}\n\n{}", abstract_text, body_text),
    }
}

fn paragraph_text(document: &Html) -> String {
    let Some(sel) = selector("p") else {
        return String::new();
    };
    let paragraphs: Vec<String> = document
        .select(&sel)
        .filter(|el| !inside_skipped(el))
        .map(|el| element_text(&el))
        .filter(|text| text.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect();
    clean_text(&paragraphs.join("\n\n"))
}

fn is_skipped(name: &str) -> bool {
    SKIPPED_TAGS.contains(&name)
}

fn inside_skipped(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| CHROME_TAGS.contains(&ancestor.value().name()))
}

/// Cleaned text of an element, skipping boilerplate descendants
pub fn element_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    clean_text(&raw)
}

fn collect_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if is_skipped(name) {
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(&child_ref, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(word: &str, times: usize) -> String {
        format!("{} is discussed at length in this sentence. ", word).repeat(times)
    }

    #[test]
    fn test_article_strategy_wins() {
        let html = format!(
            "<html><head><title>Page</title></head><body><article><p>{}</p></article><p>{}</p></body></html>",
            filler("Ownership", 12),
            filler("Sidebar", 2)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Article));
        assert!(page.text.starts_with("Ownership"));
        assert!(!page.text.contains("Sidebar"));
        assert_eq!(page.title.as_deref(), Some("Page"));
    }

    #[test]
    fn test_main_role_strategy() {
        let html = format!(
            "<html><body><div role=\"main\"><p>{}</p></div></body></html>",
            filler("Borrowing", 10)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Main));
    }

    #[test]
    fn test_cms_body_strategy() {
        let html = format!(
            "<html><body><div class=\"entry-content\"><p>{}</p></div></body></html>",
            filler("Lifetimes", 10)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::CmsBody));
    }

    #[test]
    fn test_academic_strategy_joins_abstract_and_body() {
        let html = format!(
            "<html><body><div class=\"abstract\">{}</div><div class=\"c-article-body\">{}</div></body></html>",
            filler("Abstract", 3),
            filler("Method", 6)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Academic));
        assert!(page.text.starts_with("Abstract"));
        assert!(page.text.contains("Method"));
    }

    #[test]
    fn test_paragraph_fallback_drops_crumbs() {
        let html = format!(
            "<html><body><div><p>Home</p><p>{}</p><p>{}</p></div></body></html>",
            filler("Traits", 4),
            filler("Generics", 4)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Paragraphs));
        assert!(!page.text.contains("Home"));
        assert!(page.text.contains("Traits") && page.text.contains("Generics"));
    }

    #[test]
    fn test_skipped_tags_never_extracted() {
        let html = format!(
            "<html><body><article><script>var x = 1;</script><style>p {{}}</style>\
             <nav>Menu</nav><form><button>Subscribe</button></form><p>{}</p>\
             <aside>Related</aside><footer>Copyright</footer></article></body></html>",
            filler("Macros", 10)
        );
        let page = extract_page(&html, 300);
        for boilerplate in ["var x", "Menu", "Subscribe", "Related", "Copyright", "p {}"] {
            assert!(!page.text.contains(boilerplate), "leaked {:?}", boilerplate);
        }
    }

    #[test]
    fn test_form_wrapped_page_still_extracts() {
        let html = format!(
            "<html><body><form id=\"aspnetForm\"><main><article><p>{}</p></article></main>\
             <button>Submit</button></form></body></html>",
            filler("Records", 12)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Article));
        assert!(page.text.starts_with("Records"));
        assert!(!page.text.contains("Submit"));
    }

    #[test]
    fn test_form_wrapped_paragraphs_use_fallback() {
        let html = format!(
            "<html><body><form><div><p>{}</p><p>{}</p></div></form></body></html>",
            filler("Permits", 4),
            filler("Zoning", 4)
        );
        let page = extract_page(&html, 300);
        assert_eq!(page.strategy, Some(Strategy::Paragraphs));
        assert!(page.text.contains("Permits") && page.text.contains("Zoning"));
    }

    #[test]
    fn test_article_inside_nav_is_ignored() {
        let html = format!(
            "<html><body><nav><article><p>{}</p></article></nav></body></html>",
            filler("Menu", 12)
        );
        let page = extract_page(&html, 300);
        assert!(page.text.is_empty());
    }

    #[test]
    fn test_short_page_returns_longest_candidate() {
        let html = "<html><body><article>Short article body text.</article></body></html>";
        let page = extract_page(html, 300);
        assert_eq!(page.text, "Short article body text.");
        assert_eq!(page.strategy, Some(Strategy::Article));
    }

    #[test]
    fn test_empty_page() {
        let page = extract_page("<html><body></body></html>", 300);
        assert!(page.text.is_empty());
        assert_eq!(page.strategy, None);
        assert_eq!(page.title, None);
    }

    #[test]
    fn test_og_title_preferred() {
        let html = "<html><head><title>Site | Post</title>\
                    <meta property=\"og:title\" content=\"Post\"></head><body></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(page_title(&document).as_deref(), Some("Post"));
    }

    #[test]
    fn test_block_elements_separate_words() {
        let html = "<html><body><article><h1>Title</h1><p>First</p><p>Second</p></article></body></html>";
        let page = extract_page(html, 300);
        assert_eq!(page.text, "Title\n\nFirst\n\nSecond");
    }
}
