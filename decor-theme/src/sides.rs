// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Side Descriptors
//!
//! Decorated components may paint only some of their sides, for example when
//! several buttons are grouped into one strip. Which sides are painted is
//! described by a compact 7-character token such as `"1,0,1,1"`: the
//! characters at positions 0, 2, 4 and 6 stand for the top, left, bottom and
//! right side, the others are separators.
//!
//! * Side tokens: a side is painted unless its character is `'0'`. No token
//!   at all means every side is painted.
//! * Line tokens: a thin line replaces a suppressed side only when its
//!   character is exactly `'1'` and the full side is off.
//!
//! Positions missing from a short token count as off.

use decor_core::geometry::Orientation;
use decor_core::platform::ComponentId;

/// Expected length of a side or line token.
pub const TOKEN_LEN: usize = 7;

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top side.
    Top,
    /// Left side.
    Left,
    /// Bottom side.
    Bottom,
    /// Right side.
    Right,
}

impl Side {
    /// All sides in token order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];

    /// Position of this side's character within a token.
    pub const fn token_index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Left => 2,
            Self::Bottom => 4,
            Self::Right => 6,
        }
    }
}

/// One flag per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    /// Top side flag.
    pub top: bool,
    /// Left side flag.
    pub left: bool,
    /// Bottom side flag.
    pub bottom: bool,
    /// Right side flag.
    pub right: bool,
}

impl Sides {
    /// Every flag set.
    pub const ALL: Sides = Sides::new(true, true, true, true);

    /// No flag set.
    pub const NONE: Sides = Sides::new(false, false, false, false);

    /// Create flags in top, left, bottom, right order.
    pub const fn new(top: bool, left: bool, bottom: bool, right: bool) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Flag of a single side.
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Left => self.left,
            Side::Bottom => self.bottom,
            Side::Right => self.right,
        }
    }

    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.top || self.left || self.bottom || self.right
    }

    /// Swap left and right.
    pub fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            ..self
        }
    }

    /// Encode as a token, e.g. `"1,0,1,1"`.
    pub fn to_token(&self) -> String {
        let flag = |on: bool| if on { '1' } else { '0' };
        format!(
            "{},{},{},{}",
            flag(self.top),
            flag(self.left),
            flag(self.bottom),
            flag(self.right)
        )
    }
}

/// Painted sides and replacement lines of a decorated component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideMask {
    /// Sides painted in full.
    pub sides: Sides,
    /// Thin lines painted where a full side is suppressed.
    pub lines: Sides,
}

impl Default for SideMask {
    fn default() -> Self {
        Self::parse(None, None)
    }
}

impl SideMask {
    /// Every side painted in full.
    pub const ALL: SideMask = SideMask {
        sides: Sides::ALL,
        lines: Sides::NONE,
    };

    /// Build a mask from explicit flags, dropping lines under full sides.
    pub fn new(sides: Sides, lines: Sides) -> Self {
        Self {
            sides,
            lines: Sides {
                top: lines.top && !sides.top,
                left: lines.left && !sides.left,
                bottom: lines.bottom && !sides.bottom,
                right: lines.right && !sides.right,
            },
        }
    }

    /// Parse a side token and a line token.
    pub fn parse(sides: Option<&str>, lines: Option<&str>) -> Self {
        if let Some(token) = sides.into_iter().chain(lines).find(|t| t.len() != TOKEN_LEN) {
            log::debug!("Malformed side token '{}', missing positions are off", token);
        }

        Self::new(flags(sides, side_flag), flags(lines, line_flag))
    }

    /// Apply the reading direction: right-to-left swaps left and right.
    pub fn oriented(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::LeftToRight => self,
            Orientation::RightToLeft => Self {
                sides: self.sides.mirrored(),
                lines: self.lines.mirrored(),
            },
        }
    }

    /// Whether a side is painted in full.
    pub fn paints_side(&self, side: Side) -> bool {
        self.sides.get(side)
    }

    /// Whether a side is painted as a thin line.
    pub fn paints_line(&self, side: Side) -> bool {
        self.lines.get(side)
    }

    /// Whether a side is painted in any way.
    pub fn paints(&self, side: Side) -> bool {
        self.paints_side(side) || self.paints_line(side)
    }

    /// Whether any side is painted in full.
    pub fn is_any_side(&self) -> bool {
        self.sides.any()
    }

    /// Whether any line is painted.
    pub fn is_any_line(&self) -> bool {
        self.lines.any()
    }
}

fn flags(token: Option<&str>, parse: fn(Option<&str>, Side) -> bool) -> Sides {
    Sides {
        top: parse(token, Side::Top),
        left: parse(token, Side::Left),
        bottom: parse(token, Side::Bottom),
        right: parse(token, Side::Right),
    }
}

fn token_char(token: &str, side: Side) -> Option<u8> {
    token.as_bytes().get(side.token_index()).copied()
}

fn side_flag(token: Option<&str>, side: Side) -> bool {
    match token {
        None => true,
        Some(token) => token_char(token, side).is_some_and(|c| c != b'0'),
    }
}

fn line_flag(token: Option<&str>, side: Side) -> bool {
    token
        .and_then(|token| token_char(token, side))
        .is_some_and(|c| c == b'1')
}

/// Side and line tokens of a component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SideTokens {
    /// Side token, [None] paints every side.
    pub sides: Option<String>,
    /// Line token, [None] paints no lines.
    pub lines: Option<String>,
}

impl SideTokens {
    /// Create tokens from optional strings.
    pub fn new(sides: Option<impl Into<String>>, lines: Option<impl Into<String>>) -> Self {
        Self {
            sides: sides.map(Into::into),
            lines: lines.map(Into::into),
        }
    }

    /// Parse into a mask.
    pub fn mask(&self) -> SideMask {
        SideMask::parse(self.sides.as_deref(), self.lines.as_deref())
    }
}

/// A layout that decides the sides of the components it places.
///
/// Grouping layouts use this to suppress the sides shared by neighbours.
pub trait LayoutOverride: Send + Sync {
    /// Tokens for `component`, or [None] if the layout does not manage it.
    fn side_tokens(&self, component: ComponentId) -> Option<SideTokens>;
}

/// Resolve the side mask of a component.
///
/// When the layout answers for the component its tokens replace the
/// explicit ones entirely, for both sides and lines.
pub fn resolve_sides(
    explicit: &SideTokens,
    layout_override: Option<&dyn LayoutOverride>,
    component: ComponentId,
) -> SideMask {
    match layout_override.and_then(|layout| layout.side_tokens(component)) {
        Some(tokens) => tokens.mask(),
        None => explicit.mask(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Strip;

    impl LayoutOverride for Strip {
        fn side_tokens(&self, component: ComponentId) -> Option<SideTokens> {
            match component.0 {
                1 => Some(SideTokens::new(Some("1,1,1,0"), Some("0,0,0,1"))),
                2 => Some(SideTokens::new(None::<&str>, None::<&str>)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_no_token_paints_everything() {
        let mask = SideMask::parse(None, None);
        assert_eq!(mask.sides, Sides::ALL);
        assert_eq!(mask.lines, Sides::NONE);
    }

    #[test]
    fn test_side_token_not_zero_is_on() {
        let mask = SideMask::parse(Some("0,x,1,0"), None);
        assert_eq!(mask.sides, Sides::new(false, true, true, false));
    }

    #[test]
    fn test_line_token_requires_exact_one() {
        let mask = SideMask::parse(Some("0,0,0,1"), Some("1,x,1,1"));
        assert_eq!(mask.lines, Sides::new(true, false, true, false));
    }

    #[test]
    fn test_lines_only_under_missing_sides() {
        let mask = SideMask::new(Sides::new(true, false, true, false), Sides::ALL);
        assert_eq!(mask.lines, Sides::new(false, true, false, true));
    }

    #[test]
    fn test_short_token_is_best_effort() {
        let mask = SideMask::parse(Some("1,1"), Some("1"));
        assert_eq!(mask.sides, Sides::new(true, true, false, false));
        assert_eq!(mask.lines, Sides::NONE);

        let empty = SideMask::parse(Some(""), Some(""));
        assert_eq!(empty.sides, Sides::NONE);
        assert!(!empty.is_any_side());
        assert!(!empty.is_any_line());
    }

    #[test]
    fn test_right_to_left_mirrors() {
        let mask = SideMask::parse(Some("1,0,1,1"), Some("0,1,0,0"));
        let mirrored = mask.oriented(Orientation::RightToLeft);
        assert_eq!(mirrored.sides, Sides::new(true, true, true, false));
        assert_eq!(mirrored.lines, Sides::new(false, false, false, true));
        assert_eq!(mask.oriented(Orientation::LeftToRight), mask);
    }

    #[test]
    fn test_override_replaces_explicit_tokens() {
        let explicit = SideTokens::new(Some("0,0,0,0"), Some("1,1,1,1"));

        let managed = resolve_sides(&explicit, Some(&Strip), ComponentId(1));
        assert_eq!(managed.sides, Sides::new(true, true, true, false));
        assert_eq!(managed.lines, Sides::new(false, false, false, true));

        // The layout answering with no tokens still wins over the explicit ones.
        let all = resolve_sides(&explicit, Some(&Strip), ComponentId(2));
        assert_eq!(all, SideMask::ALL);

        let unmanaged = resolve_sides(&explicit, Some(&Strip), ComponentId(3));
        assert_eq!(unmanaged.sides, Sides::NONE);
        assert_eq!(unmanaged.lines, Sides::ALL);

        assert_eq!(resolve_sides(&explicit, None, ComponentId(1)), unmanaged);
    }

    #[test]
    fn test_token_round_trip() {
        let sides = Sides::new(true, false, true, true);
        assert_eq!(sides.to_token(), "1,0,1,1");
        assert_eq!(SideMask::parse(Some(&sides.to_token()), None).sides, sides);
    }
}
