//! Keyboard input mapping

use crate::sim::Heading;

/// Map a `KeyboardEvent.key` value to a heading.
///
/// Arrow keys and WASD are accepted; letters are case-insensitive.
pub fn heading_for_key(key: &str) -> Option<Heading> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Heading::Up),
        "ArrowDown" | "s" | "S" => Some(Heading::Down),
        "ArrowLeft" | "a" | "A" => Some(Heading::Left),
        "ArrowRight" | "d" | "D" => Some(Heading::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd() {
        assert_eq!(heading_for_key("ArrowUp"), Some(Heading::Up));
        assert_eq!(heading_for_key("s"), Some(Heading::Down));
        assert_eq!(heading_for_key("A"), Some(Heading::Left));
        assert_eq!(heading_for_key("ArrowRight"), Some(Heading::Right));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(heading_for_key(" "), None);
        assert_eq!(heading_for_key("Escape"), None);
        assert_eq!(heading_for_key("arrowup"), None);
    }
}
