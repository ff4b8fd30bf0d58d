/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! CSL style rendering engine
//!
//! A style is compiled once from its XML tree into a [`Style`]: a closed
//! union of rendering [`Element`]s plus the macros they call. Compilation
//! rejects malformed styles with a [`StyleError`]. Rendering a record
//! against a [`Locale`](csl_core::Locale) never fails and produces a
//! [`TokenBuffer`], which an [`OutputFormat`] turns into text or markup.
//!
//! # Example
//!
//! ```rust
//! use csl_core::{Date, Locale, Name, Reference};
//! use csl_engine::{OutputFormat, PlainText, Style};
//!
//! let style = Style::from_xml(
//!     r#"<style>
//!       <citation>
//!         <layout prefix="(" suffix=")">
//!           <names variable="author"><name form="short"/></names>
//!           <date variable="issued" prefix=", "><date-part name="year"/></date>
//!         </layout>
//!       </citation>
//!     </style>"#,
//! )
//! .unwrap();
//!
//! let reference = Reference::new("kuhn1962", "book")
//!     .with_names("author", vec![Name::new("Kuhn", "Thomas")])
//!     .with_date("issued", Date::from_parts(&[1962]));
//!
//! let tokens = style.render_citation_item(&reference, &Locale::en_us(), None);
//! assert_eq!(PlainText.format(&tokens), "(Kuhn, 1962)");
//! ```

pub mod behavior;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod listener;
pub mod node;
pub mod render;
pub mod style;
pub mod token;

pub use behavior::{Behavior, FormattingAttributes, NameInheritableAttributes};
pub use config::EngineConfig;
pub use context::{CitationItem, Position, RenderContext, RenderScope, VariableForm};
pub use element::{Element, Macro};
pub use error::{Result, StyleError};
pub use listener::{VariableListener, VariableValue};
pub use node::StyleNode;
pub use render::{Html, OutputFormat, PlainText};
pub use style::{Layout, Style};
pub use token::{Token, TokenBuffer, TokenKind};
