use super::types::DetailFields;
use anyhow::{bail, Result as AnyhowResult};
use scraper::{ElementRef, Html};

const MATERIALS_LABEL: &str = "Application Materials Required:";
const LOCATION_LABEL: &str = "Position Location:";
const SUBJECT_LABEL: &str = "Subject Area:";

/// Inline tags whose text belongs to a posting's display title.
const TITLE_TAGS: [&str; 4] = ["a", "b", "i", "u"];

/// Extracts the optional sections of a posting's detail page.
///
/// Every section is optional: a missing "Application Materials Required"
/// list yields an empty vector, a missing location or subject area yields an
/// empty string.
///
/// # Arguments
///
/// * `html` - The raw markup of the detail page.
///
/// # Returns
///
/// * `Ok(DetailFields)` - The extracted sections.
/// * `Err(anyhow::Error)` - The page has no markup at all.
pub fn extract_detail_fields(html: &str) -> AnyhowResult<DetailFields> {
    if html.trim().is_empty() {
        bail!("Detail page is empty");
    }
    let document = Html::parse_document(html);

    Ok(DetailFields {
        application_materials: application_materials(&document),
        position_location: labelled_value(&document, LOCATION_LABEL).unwrap_or_default(),
        subject_area: labelled_value(&document, SUBJECT_LABEL).unwrap_or_default(),
    })
}

/// Reconstructs a posting's display title from its listing entry.
///
/// The title is every text node and inline emphasis element that sits
/// between the posting's first link and its `span.purplesml` deadline
/// marker. A leading `]` left over from the bracketed id is dropped.
pub fn extract_title(position: ElementRef<'_>) -> String {
    let Some(link) = first_element(position, "a") else {
        return String::new();
    };
    let deadline_marker = deadline_marker(position).map(|span| span.id());

    let mut parts: Vec<String> = Vec::new();
    let mut current = link.next_sibling();
    while let Some(node) = current {
        if Some(node.id()) == deadline_marker {
            break;
        }
        if let Some(text) = node.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        } else if let Some(element) = ElementRef::wrap(node) {
            if TITLE_TAGS.contains(&element.value().name()) {
                let text = collapsed_text(element);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
        current = node.next_sibling();
    }

    let title = parts.join(" ");
    match title.strip_prefix(']') {
        Some(rest) => rest.trim().to_string(),
        None => title.trim().to_string(),
    }
}

/// Returns the `span.purplesml` element holding a listing entry's deadline.
pub(crate) fn deadline_marker(position: ElementRef<'_>) -> Option<ElementRef<'_>> {
    position
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span" && el.value().classes().any(|c| c == "purplesml"))
}

/// Returns the first descendant element with the given tag name.
pub(crate) fn first_element<'a>(scope: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}

/// Joins an element's non-blank text nodes with single spaces.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn application_materials(document: &Html) -> Vec<String> {
    let Some(label) = find_label(document, MATERIALS_LABEL) else {
        return Vec::new();
    };
    let Some(list) = next_element_named(document, label, "ul") else {
        return Vec::new();
    };

    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
        .map(collapsed_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Finds the `<b>` label with the given text and returns the text of the
/// first `<div>` following the label's parent.
fn labelled_value(document: &Html, label: &str) -> Option<String> {
    let label = find_label(document, label)?;
    let holder = label.parent()?;
    holder
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")
        .map(|div| div.text().collect::<String>().trim().to_string())
}

fn find_label<'a>(document: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "b" && el.text().collect::<String>().trim() == label)
}

/// Returns the first element named `name` that follows `anchor` in document order.
fn next_element_named<'a>(
    document: &'a Html,
    anchor: ElementRef<'a>,
    name: &str,
) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}
