/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Font and decoration attributes packed into a single integer.
//!
//! Five 2-bit fields hold font-style, font-variant, font-weight,
//! text-decoration and vertical-align. A field value of `0` means "not
//! set", which is what lets an inner element inherit from an outer one:
//! [`FormattingAttributes::merge`] only copies fields that are set.

use std::fmt;

use crate::context::RenderContext;
use crate::node::StyleNode;
use crate::token::TokenBuffer;

use super::Behavior;

const FONT_STYLE: u16 = 0;
const FONT_VARIANT: u16 = 2;
const FONT_WEIGHT: u16 = 4;
const TEXT_DECORATION: u16 = 6;
const VERTICAL_ALIGN: u16 = 8;
const FIELD_MASK: u16 = 0b11;

macro_rules! attribute_enum {
    ($(#[$meta:meta])* $name:ident, $shift:expr, { $($variant:ident = $bits:expr => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            const SHIFT: u16 = $shift;

            fn bits(self) -> u16 {
                match self {
                    $($name::$variant => $bits),+
                }
            }

            fn from_bits(bits: u16) -> Option<Self> {
                match bits {
                    $($bits => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Parse a CSL attribute value. Unknown values yield `None`.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }
    };
}

attribute_enum!(FontStyle, FONT_STYLE, {
    Normal = 1 => "normal",
    Italic = 2 => "italic",
    Oblique = 3 => "oblique",
});

attribute_enum!(FontVariant, FONT_VARIANT, {
    Normal = 1 => "normal",
    SmallCaps = 2 => "small-caps",
});

attribute_enum!(FontWeight, FONT_WEIGHT, {
    Normal = 1 => "normal",
    Bold = 2 => "bold",
    Light = 3 => "light",
});

attribute_enum!(TextDecoration, TEXT_DECORATION, {
    None = 1 => "none",
    Underline = 2 => "underline",
});

attribute_enum!(VerticalAlign, VERTICAL_ALIGN, {
    Baseline = 1 => "baseline",
    Sup = 2 => "sup",
    Sub = 3 => "sub",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FormattingAttributes(u16);

impl FormattingAttributes {
    pub const UNDEFINED: FormattingAttributes = FormattingAttributes(0);

    /// Read `font-style`, `font-variant`, `font-weight`, `text-decoration`
    /// and `vertical-align`. Unrecognized values leave their field unset.
    pub fn from_node<N: StyleNode>(node: &N) -> Self {
        let mut attributes = FormattingAttributes::UNDEFINED;
        if let Some(v) = node.attr("font-style").and_then(FontStyle::parse) {
            attributes = attributes.with_font_style(v);
        }
        if let Some(v) = node.attr("font-variant").and_then(FontVariant::parse) {
            attributes = attributes.with_font_variant(v);
        }
        if let Some(v) = node.attr("font-weight").and_then(FontWeight::parse) {
            attributes = attributes.with_font_weight(v);
        }
        if let Some(v) = node.attr("text-decoration").and_then(TextDecoration::parse) {
            attributes = attributes.with_text_decoration(v);
        }
        if let Some(v) = node.attr("vertical-align").and_then(VerticalAlign::parse) {
            attributes = attributes.with_vertical_align(v);
        }
        attributes
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_undefined(self) -> bool {
        self.0 == 0
    }

    fn field(self, shift: u16) -> u16 {
        (self.0 >> shift) & FIELD_MASK
    }

    fn with_field(self, shift: u16, bits: u16) -> Self {
        FormattingAttributes((self.0 & !(FIELD_MASK << shift)) | ((bits & FIELD_MASK) << shift))
    }

    pub fn with_font_style(self, value: FontStyle) -> Self {
        self.with_field(FontStyle::SHIFT, value.bits())
    }

    pub fn with_font_variant(self, value: FontVariant) -> Self {
        self.with_field(FontVariant::SHIFT, value.bits())
    }

    pub fn with_font_weight(self, value: FontWeight) -> Self {
        self.with_field(FontWeight::SHIFT, value.bits())
    }

    pub fn with_text_decoration(self, value: TextDecoration) -> Self {
        self.with_field(TextDecoration::SHIFT, value.bits())
    }

    pub fn with_vertical_align(self, value: VerticalAlign) -> Self {
        self.with_field(VerticalAlign::SHIFT, value.bits())
    }

    pub fn font_style(self) -> Option<FontStyle> {
        FontStyle::from_bits(self.field(FontStyle::SHIFT))
    }

    pub fn font_variant(self) -> Option<FontVariant> {
        FontVariant::from_bits(self.field(FontVariant::SHIFT))
    }

    pub fn font_weight(self) -> Option<FontWeight> {
        FontWeight::from_bits(self.field(FontWeight::SHIFT))
    }

    pub fn text_decoration(self) -> Option<TextDecoration> {
        TextDecoration::from_bits(self.field(TextDecoration::SHIFT))
    }

    pub fn vertical_align(self) -> Option<VerticalAlign> {
        VerticalAlign::from_bits(self.field(VerticalAlign::SHIFT))
    }

    /// Fields set in `other` replace those in `self`; unset fields in
    /// `other` keep the value from `self`.
    pub fn merge(self, other: FormattingAttributes) -> Self {
        [FONT_STYLE, FONT_VARIANT, FONT_WEIGHT, TEXT_DECORATION, VERTICAL_ALIGN]
            .into_iter()
            .fold(self, |acc, shift| match other.field(shift) {
                0 => acc,
                bits => acc.with_field(shift, bits),
            })
    }
}

impl fmt::Display for FormattingAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("font-style", self.font_style().map(FontStyle::as_str)),
            ("font-variant", self.font_variant().map(FontVariant::as_str)),
            ("font-weight", self.font_weight().map(FontWeight::as_str)),
            ("text-decoration", self.text_decoration().map(TextDecoration::as_str)),
            ("vertical-align", self.vertical_align().map(VerticalAlign::as_str)),
        ];
        let set: Vec<String> = fields
            .iter()
            .filter_map(|(name, value)| value.map(|v| format!("{}: {}", name, v)))
            .collect();
        write!(f, "{{{}}}", set.join(", "))
    }
}

/// Attributes of an element wrap the attributes of the tokens it renders.
/// Whatever a token already sets wins.
impl Behavior for FormattingAttributes {
    fn apply(&self, _ctx: &RenderContext<'_>, mut buffer: TokenBuffer) -> TokenBuffer {
        if !self.is_undefined() {
            buffer.wrap_formatting(*self);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let base = FormattingAttributes::UNDEFINED
            .with_font_style(FontStyle::Normal)
            .with_font_variant(FontVariant::SmallCaps);
        let inner = FormattingAttributes::UNDEFINED.with_font_style(FontStyle::Italic);

        let merged = base.merge(inner);
        assert_eq!(merged.font_style(), Some(FontStyle::Italic));
        assert_eq!(merged.font_variant(), Some(FontVariant::SmallCaps));
        assert_eq!(merged.font_weight(), None);
    }

    #[test]
    fn test_merge_with_undefined_is_identity() {
        let a = FormattingAttributes::UNDEFINED
            .with_font_weight(FontWeight::Bold)
            .with_vertical_align(VerticalAlign::Sup);
        assert_eq!(a.merge(FormattingAttributes::UNDEFINED), a);
        assert_eq!(FormattingAttributes::UNDEFINED.merge(a), a);
    }

    #[test]
    fn test_fields_are_independent() {
        let a = FormattingAttributes::UNDEFINED
            .with_font_style(FontStyle::Oblique)
            .with_font_variant(FontVariant::Normal)
            .with_font_weight(FontWeight::Light)
            .with_text_decoration(TextDecoration::Underline)
            .with_vertical_align(VerticalAlign::Sub);
        assert_eq!(a.font_style(), Some(FontStyle::Oblique));
        assert_eq!(a.font_variant(), Some(FontVariant::Normal));
        assert_eq!(a.font_weight(), Some(FontWeight::Light));
        assert_eq!(a.text_decoration(), Some(TextDecoration::Underline));
        assert_eq!(a.vertical_align(), Some(VerticalAlign::Sub));

        let b = a.with_font_style(FontStyle::Italic);
        assert_eq!(b.font_style(), Some(FontStyle::Italic));
        assert_eq!(b.vertical_align(), Some(VerticalAlign::Sub));
    }

    #[test]
    fn test_from_node_ignores_unknown_values() {
        let doc = roxmltree::Document::parse(
            r#"<text font-style="italic" font-weight="heavy" text-decoration="underline"/>"#,
        )
        .unwrap();
        let a = FormattingAttributes::from_node(&doc.root_element());
        assert_eq!(a.font_style(), Some(FontStyle::Italic));
        assert_eq!(a.font_weight(), None);
        assert_eq!(a.text_decoration(), Some(TextDecoration::Underline));
        assert_eq!(a.to_string(), "{font-style: italic, text-decoration: underline}");
    }
}
