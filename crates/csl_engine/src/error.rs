/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Errors raised while compiling a style.
///
/// Rendering itself never fails: a malformed style is rejected here, and
/// problems with individual values degrade locally.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<choose> contains more than one <if>")]
    MultipleIf,

    #[error("<else-if> without a preceding <if>")]
    ElseIfWithoutIf,

    #[error("<{0}> follows <else>")]
    ElementAfterElse(String),

    #[error("<choose> contains more than one <else>")]
    MultipleElse,

    #[error("unknown conditional element <{0}>")]
    UnknownConditional(String),

    #[error("unknown value for `and`: {0}")]
    UnknownAnd(String),

    #[error("unknown match mode: {0}")]
    UnknownMatch(String),

    #[error("unknown date part: {0}")]
    UnknownDatePart(String),

    #[error("date part `{0}` is given more than once")]
    DuplicateDatePart(String),

    #[error("unknown name part: {0}")]
    UnknownNamePart(String),

    #[error("name part `{0}` is given more than once")]
    DuplicateNamePart(String),

    #[error("unknown term form: {0}")]
    UnknownTermForm(String),

    #[error("reference to undefined macro `{0}`")]
    UnknownMacro(String),

    #[error("recursive macro reference: {}", .0.join(" -> "))]
    MacroRecursion(Vec<String>),

    #[error("macro nesting deeper than {0} levels")]
    MacroDepth(usize),

    #[error("style has no <{0}> layout")]
    MissingLayout(&'static str),

    #[error("unknown page range format: {0}")]
    UnknownPageRangeFormat(String),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StyleError>;
