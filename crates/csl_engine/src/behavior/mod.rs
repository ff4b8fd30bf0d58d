/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Reusable attribute behaviors shared by rendering elements.
//!
//! A behavior post-processes the tokens an element produced. Elements list
//! their behaviors from outermost to innermost and call
//! [`render_wrapped`], which renders the element body into a child context
//! and applies the list innermost first before handing the result to the
//! parent.

mod affixes;
mod display;
mod formatting;
mod name_attributes;
mod quotes;
mod strip_periods;
mod text_case;

pub use affixes::Affixes;
pub use display::Display;
pub use formatting::{
    FontStyle, FontVariant, FontWeight, FormattingAttributes, TextDecoration, VerticalAlign,
};
pub use name_attributes::{And, DelimiterPrecedes, NameAsSortOrder, NameInheritableAttributes};
pub use quotes::Quotes;
pub use strip_periods::StripPeriods;
pub use text_case::TextCase;

use crate::context::RenderContext;
use crate::token::TokenBuffer;

pub trait Behavior {
    fn apply(&self, ctx: &RenderContext<'_>, buffer: TokenBuffer) -> TokenBuffer;
}

impl<B: Behavior> Behavior for Option<B> {
    fn apply(&self, ctx: &RenderContext<'_>, buffer: TokenBuffer) -> TokenBuffer {
        match self {
            Some(behavior) => behavior.apply(ctx, buffer),
            None => buffer,
        }
    }
}

/// Render `body` into a child of `ctx`, run the result through `stages`
/// (listed outermost first) and append it to `ctx`.
pub fn render_wrapped<F>(ctx: &mut RenderContext<'_>, stages: &[&dyn Behavior], body: F)
where
    F: FnOnce(&mut RenderContext<'_>),
{
    let mut child = ctx.child();
    body(&mut child);
    let buffer = stages
        .iter()
        .rev()
        .fold(child.into_result(), |buffer, stage| stage.apply(ctx, buffer));
    ctx.emit_buffer(buffer);
}
