//! `gitdraw preview` command.

use std::collections::BTreeSet;

use crate::draw::Grid;
use crate::error::Error;
use crate::font;

/// Prints the grid for `text`, noting characters that render blank.
///
/// # Errors
///
/// Returns [`Error::EmptyText`] for blank text.
pub fn run(text: &str) -> Result<(), Error> {
    print!("{}", render(text)?);
    Ok(())
}

fn render(text: &str) -> Result<String, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    let mut out = Grid::from_text(&text.to_uppercase()).render();

    let unknown: BTreeSet<char> = text.chars().filter(|c| !font::is_supported(*c)).collect();
    if !unknown.is_empty() {
        let list: String = unknown.into_iter().collect();
        out.push_str(&format!("\nno glyph for {list:?}; rendered blank\n"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_seven_rows() {
        let out = render("hi").unwrap();
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn flags_unknown_characters() {
        let out = render("a~b").unwrap();
        assert!(out.contains("no glyph for \"~\""));
    }

    #[test]
    fn unknown_characters_are_listed_once() {
        let out = render("~A~").unwrap();
        assert!(out.contains("no glyph for \"~\""));
        assert!(!out.contains("~~"));
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(render("  "), Err(Error::EmptyText)));
    }
}
