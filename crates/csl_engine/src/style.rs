/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! A compiled style: macros plus the citation and bibliography layouts.

use std::collections::HashMap;

use csl_core::{Locale, Reference};
use csl_parse::{AnyDateParsers, PageRangeFormat};
use indexmap::IndexMap;

use crate::behavior::{
    render_wrapped, Affixes, Behavior, FormattingAttributes, NameInheritableAttributes,
};
use crate::config::EngineConfig;
use crate::context::{CitationItem, RenderContext, RenderScope};
use crate::element::{Element, Macro};
use crate::error::{Result, StyleError};
use crate::node::StyleNode;
use crate::token::{TokenBuffer, TokenKind};

/// A `citation` or `bibliography` block.
#[derive(Debug, Clone)]
pub struct Layout {
    elements: Vec<Element>,
    affixes: Affixes,
    formatting: FormattingAttributes,
    /// Joins the cites of one citation.
    delimiter: Option<String>,
    /// Name options set on the `citation`/`bibliography` element.
    name_attributes: NameInheritableAttributes,
}

impl Layout {
    /// Compile `<citation>` or `<bibliography>`, whose `<layout>` child
    /// holds the elements.
    fn compile<N: StyleNode>(node: &N) -> Result<Self> {
        let name_attributes = NameInheritableAttributes::from_node(node)?;
        let Some(layout) = node.find_child("layout") else {
            tracing::warn!(element = node.name(), "no <layout> child");
            return Err(StyleError::MissingAttribute {
                element: node.name().to_string(),
                attribute: "layout",
            });
        };
        Ok(Self {
            elements: Element::compile_children(&layout)?,
            affixes: Affixes::from_node(&layout),
            formatting: FormattingAttributes::from_node(&layout),
            delimiter: layout.attr("delimiter").map(str::to_string),
            name_attributes,
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    /// The layout elements without the layout's own affixes and formatting.
    fn render_body(&self, ctx: &mut RenderContext<'_>) {
        let mut inner = ctx.child_with_name_attributes(&self.name_attributes);
        for element in &self.elements {
            element.render(&mut inner);
        }
        ctx.emit_buffer(inner.into_result());
    }
}

#[derive(Debug)]
pub struct Style {
    title: Option<String>,
    macros: IndexMap<String, Macro>,
    citation: Layout,
    bibliography: Option<Layout>,
    name_attributes: NameInheritableAttributes,
    page_range_format: Option<PageRangeFormat>,
    default_locale: String,
    date_parsers: AnyDateParsers,
    fallback_locale: Locale,
}

impl Style {
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_xml_with_config(xml, &EngineConfig::default())
    }

    pub fn from_xml_with_config(xml: &str, config: &EngineConfig) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        Self::compile(&doc.root_element(), config)
    }

    /// Compile a `<style>` element and check its macro references.
    pub fn compile<N: StyleNode>(root: &N, config: &EngineConfig) -> Result<Self> {
        let mut title = None;
        let mut macros = IndexMap::new();
        let mut citation = None;
        let mut bibliography = None;

        for child in root.children() {
            match child.name() {
                "info" => {
                    title = child
                        .find_child("title")
                        .and_then(|t| t.text().map(str::to_string));
                }
                "macro" => {
                    let m = Macro::compile(&child)?;
                    macros.insert(m.name().to_string(), m);
                }
                "citation" => citation = Some(Layout::compile(&child)?),
                "bibliography" => bibliography = Some(Layout::compile(&child)?),
                "locale" => {}
                other => tracing::debug!(element = other, "ignoring top-level element"),
            }
        }

        let citation = citation.ok_or_else(|| {
            tracing::warn!("style has no citation layout");
            StyleError::MissingLayout("citation")
        })?;

        let page_range_format = match &config.page_range_format {
            Some(format) => Some(
                format
                    .parse::<PageRangeFormat>()
                    .map_err(|_| StyleError::UnknownPageRangeFormat(format.clone()))?,
            ),
            None => root.attr("page-range-format").and_then(|format| {
                let parsed = format.parse::<PageRangeFormat>().ok();
                if parsed.is_none() {
                    tracing::warn!(format, "ignoring unknown page-range-format");
                }
                parsed
            }),
        };

        let style = Self {
            title,
            macros,
            citation,
            bibliography,
            name_attributes: NameInheritableAttributes::from_node(root)?,
            page_range_format,
            default_locale: root
                .attr("default-locale")
                .map_or_else(|| config.default_locale.clone(), str::to_string),
            date_parsers: AnyDateParsers::new(),
            fallback_locale: Locale::en_us(),
        };
        style.check_macros(config.max_macro_depth)?;

        tracing::debug!(
            title = style.title.as_deref().unwrap_or_default(),
            macros = style.macros.len(),
            bibliography = style.bibliography.is_some(),
            "compiled style"
        );
        Ok(style)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn macros(&self) -> &IndexMap<String, Macro> {
        &self.macros
    }

    pub fn citation(&self) -> &Layout {
        &self.citation
    }

    pub fn bibliography(&self) -> Option<&Layout> {
        self.bibliography.as_ref()
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn page_range_format(&self) -> Option<PageRangeFormat> {
        self.page_range_format
    }

    /// Reject references to undefined macros, macro cycles, and nesting
    /// deeper than `max_depth`.
    fn check_macros(&self, max_depth: usize) -> Result<()> {
        let layouts = std::iter::once(&self.citation).chain(self.bibliography.as_ref());
        for layout in layouts {
            let mut refs = Vec::new();
            for element in layout.elements() {
                element.macro_refs(&mut refs);
            }
            for name in refs {
                if !self.macros.contains_key(name) {
                    tracing::warn!(name, "layout calls an undefined macro");
                    return Err(StyleError::UnknownMacro(name.to_string()));
                }
            }
        }

        let mut heights: HashMap<&str, usize> = HashMap::new();
        for name in self.macros.keys() {
            let mut chain = Vec::new();
            self.macro_height(name, &mut chain, &mut heights, max_depth)?;
        }
        Ok(())
    }

    /// Nesting depth below and including macro `name`.
    fn macro_height<'s>(
        &'s self,
        name: &'s str,
        chain: &mut Vec<&'s str>,
        heights: &mut HashMap<&'s str, usize>,
        max_depth: usize,
    ) -> Result<usize> {
        if let Some(height) = heights.get(name) {
            return Ok(*height);
        }
        if let Some(start) = chain.iter().position(|m| *m == name) {
            let mut cycle: Vec<String> = chain[start..].iter().map(|m| m.to_string()).collect();
            cycle.push(name.to_string());
            tracing::warn!(cycle = ?cycle, "recursive macro");
            return Err(StyleError::MacroRecursion(cycle));
        }
        let Some(m) = self.macros.get(name) else {
            tracing::warn!(name, "reference to undefined macro");
            return Err(StyleError::UnknownMacro(name.to_string()));
        };

        chain.push(name);
        let mut height = 1;
        for callee in m.macro_refs() {
            height = height.max(1 + self.macro_height(callee, chain, heights, max_depth)?);
        }
        chain.pop();

        if height > max_depth {
            tracing::warn!(name, height, max_depth, "macros nest too deeply");
            return Err(StyleError::MacroDepth(max_depth));
        }
        heights.insert(name, height);
        Ok(height)
    }

    fn scope<'a>(
        &'a self,
        reference: &'a Reference,
        locale: &'a Locale,
        item: Option<&'a CitationItem>,
    ) -> RenderScope<'a> {
        RenderScope::new(reference, locale)
            .with_macros(&self.macros)
            .with_item(item)
            .with_date_parsers(&self.date_parsers, &self.fallback_locale)
            .with_page_range_format(self.page_range_format)
    }

    fn render_layout(
        &self,
        layout: &Layout,
        reference: &Reference,
        locale: &Locale,
        item: Option<&CitationItem>,
    ) -> TokenBuffer {
        let scope = self.scope(reference, locale, item);
        let root = RenderContext::new(&scope);
        let mut ctx = root.child_with_name_attributes(&self.name_attributes);
        render_wrapped(&mut ctx, &[&layout.affixes, &layout.formatting], |c| {
            layout.render_body(c)
        });
        ctx.into_result()
    }

    /// Render one cite of `reference` with the citation layout.
    pub fn render_citation_item(
        &self,
        reference: &Reference,
        locale: &Locale,
        item: Option<&CitationItem>,
    ) -> TokenBuffer {
        self.render_layout(&self.citation, reference, locale, item)
    }

    /// Render several cites as one citation: the layout's elements for each
    /// cite, joined by the layout delimiter, inside the layout's affixes.
    pub fn render_citation(
        &self,
        cites: &[(&Reference, Option<&CitationItem>)],
        locale: &Locale,
    ) -> TokenBuffer {
        let Some((first, _)) = cites.first() else {
            return TokenBuffer::new();
        };
        let layout = &self.citation;
        let mut body = TokenBuffer::new();
        for (reference, item) in cites {
            let scope = self.scope(reference, locale, *item);
            let root = RenderContext::new(&scope);
            let mut ctx = root.child_with_name_attributes(&self.name_attributes);
            layout.render_body(&mut ctx);
            let cite = ctx.into_result();
            if cite.is_empty() {
                continue;
            }
            if !body.is_empty() {
                if let Some(delimiter) = layout.delimiter() {
                    body.append_text(delimiter, TokenKind::Delimiter);
                }
            }
            body.append_buffer(cite);
        }

        let scope = RenderScope::new(first, locale);
        let ctx = RenderContext::new(&scope);
        let body = layout.formatting.apply(&ctx, body);
        layout.affixes.apply(&ctx, body)
    }

    /// Render `reference` with the bibliography layout. A style without a
    /// bibliography renders nothing.
    pub fn render_bibliography_entry(&self, reference: &Reference, locale: &Locale) -> TokenBuffer {
        match &self.bibliography {
            Some(layout) => self.render_layout(layout, reference, locale, None),
            None => TokenBuffer::new(),
        }
    }
}
