//! Separated lists.

use thiserror::Error;

use weft_core::CsTokenKind;

use crate::token::SyntaxToken;

/// Errors raised when list elements do not alternate item and separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list element {index} should be an item, found separator `{found}`")]
    ExpectedItem { index: usize, found: String },

    #[error("list element {index} should be a separator, found an item")]
    ExpectedSeparator { index: usize },
}

/// One element of a separated list, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element<T> {
    Item(T),
    Separator(SyntaxToken),
}

/// A list of items with the separator tokens between them.
///
/// Holds either one separator fewer than items, or, with a trailing
/// separator, exactly as many.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatedList<T> {
    items: Vec<T>,
    separators: Vec<SyntaxToken>,
}

impl<T> Default for SeparatedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SeparatedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            separators: Vec::new(),
        }
    }

    /// Create a comma separated list.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self::from_items_with(items, CsTokenKind::Comma)
    }

    /// Create a list separated by `separator` tokens.
    pub fn from_items_with(items: impl IntoIterator<Item = T>, separator: CsTokenKind) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let separators = (1..items.len())
            .map(|_| SyntaxToken::fixed(separator))
            .collect();
        Self { items, separators }
    }

    /// Create a list from alternating items and separators.
    ///
    /// The first element must be an item; a trailing separator is allowed.
    ///
    /// # Errors
    ///
    /// Fails with [`ListError`] at the first element that breaks alternation.
    pub fn from_elements(elements: impl IntoIterator<Item = Element<T>>) -> Result<Self, ListError> {
        let mut list = Self::new();
        for (index, element) in elements.into_iter().enumerate() {
            let expect_item = index % 2 == 0;
            match element {
                Element::Item(item) if expect_item => list.items.push(item),
                Element::Separator(token) if !expect_item => list.separators.push(token),
                Element::Item(_) => return Err(ListError::ExpectedSeparator { index }),
                Element::Separator(token) => {
                    return Err(ListError::ExpectedItem {
                        index,
                        found: token.text().to_string(),
                    });
                }
            }
        }
        Ok(list)
    }

    /// Create a list whose items are all omitted.
    ///
    /// `n` separators yield `n + 1` items, each produced by `omitted`: the
    /// list `[,,]` has three omitted sizes.
    pub fn all_omitted(separators: Vec<SyntaxToken>, mut omitted: impl FnMut() -> T) -> Self {
        let items = (0..=separators.len()).map(|_| omitted()).collect();
        Self { items, separators }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn separators(&self) -> &[SyntaxToken] {
        &self.separators
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn has_trailing_separator(&self) -> bool {
        !self.items.is_empty() && self.separators.len() == self.items.len()
    }

    /// Append `item`, adding a comma before it if needed.
    pub fn push(&mut self, item: T) {
        if !self.items.is_empty() && !self.has_trailing_separator() {
            self.separators.push(SyntaxToken::fixed(CsTokenKind::Comma));
        }
        self.items.push(item);
    }

    /// Items and separators interleaved in source order.
    pub fn elements(&self) -> impl Iterator<Item = Element<&T>> {
        let mut separators = self.separators.iter();
        self.items.iter().flat_map(move |item| {
            let separator = separators.next().cloned().map(Element::Separator);
            std::iter::once(Element::Item(item)).chain(separator)
        })
    }

    /// Transform every item, keeping the separators.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SeparatedList<U> {
        SeparatedList {
            items: self.items.into_iter().map(f).collect(),
            separators: self.separators,
        }
    }

    /// Transform every item, keeping the separators, stopping at the first
    /// failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<SeparatedList<U>, E> {
        Ok(SeparatedList {
            items: self.items.into_iter().map(f).collect::<Result<_, E>>()?,
            separators: self.separators,
        })
    }
}

impl<T> FromIterator<T> for SeparatedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<'a, T> IntoIterator for &'a SeparatedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comma() -> SyntaxToken {
        SyntaxToken::fixed(CsTokenKind::Comma)
    }

    #[test]
    fn test_from_items_synthesizes_commas() {
        let list = SeparatedList::from_items([1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.separators().len(), 2);
        assert!(!list.has_trailing_separator());
    }

    #[test]
    fn test_from_elements_alternation() {
        let list = SeparatedList::from_elements([
            Element::Item("a"),
            Element::Separator(comma()),
            Element::Item("b"),
            Element::Separator(comma()),
        ])
        .unwrap();
        assert_eq!(list.items(), ["a", "b"]);
        assert!(list.has_trailing_separator());
    }

    #[test]
    fn test_from_elements_rejects_leading_separator() {
        let result = SeparatedList::<&str>::from_elements([Element::Separator(comma())]);
        assert_eq!(
            result,
            Err(ListError::ExpectedItem {
                index: 0,
                found: ",".to_string(),
            })
        );
    }

    #[test]
    fn test_from_elements_rejects_adjacent_items() {
        let result = SeparatedList::from_elements([Element::Item(1), Element::Item(2)]);
        assert_eq!(result, Err(ListError::ExpectedSeparator { index: 1 }));
    }

    #[test]
    fn test_all_omitted_yields_one_more_item() {
        let list = SeparatedList::all_omitted(vec![comma(), comma()], || "omitted");
        assert_eq!(list.len(), 3);
        assert_eq!(list.separators().len(), 2);

        let single = SeparatedList::all_omitted(Vec::new(), || 0);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_elements_interleave() {
        let list = SeparatedList::from_items(["x", "y"]);
        let rendered: Vec<String> = list
            .elements()
            .map(|element| match element {
                Element::Item(item) => item.to_string(),
                Element::Separator(token) => token.text().to_string(),
            })
            .collect();
        assert_eq!(rendered, ["x", ",", "y"]);
    }

    #[test]
    fn test_push_adds_separator() {
        let mut list = SeparatedList::new();
        list.push(1);
        list.push(2);
        assert_eq!(list.separators().len(), 1);
    }
}
