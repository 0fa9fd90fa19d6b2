//! Pure views over the loaded documents: ordering, grouping and filtering.
//!
//! Nothing here mutates a [`Document`]; every function returns a fresh view
//! of borrowed documents, so themes can derive whatever shape they need.
use chrono::Datelike;

use crate::config::SortOrder;
use crate::content::Document;

/// Stable sort by publication date. Documents with equal dates keep the
/// order they were given in.
pub fn sort_by_date<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    order: SortOrder,
) -> Vec<&'a Document> {
    let mut sorted: Vec<&Document> = documents.into_iter().collect();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    sorted
}

/// Groups documents by calendar year of publication, newest year first.
/// Within a group, documents keep the order they were given in.
pub fn group_by_year<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
) -> Vec<(i32, Vec<&'a Document>)> {
    let mut groups: Vec<(i32, Vec<&Document>)> = Vec::new();

    for document in documents {
        let year = document.date.year();
        match groups.iter_mut().find(|(group_year, _)| *group_year == year) {
            Some((_, documents)) => documents.push(document),
            None => groups.push((year, vec![document])),
        }
    }

    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

/// Keeps only the documents carrying the given tag.
pub fn filter_by_tag<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    tag: &str,
) -> Vec<&'a Document> {
    documents
        .into_iter()
        .filter(|document| document.has_tag(tag))
        .collect()
}
