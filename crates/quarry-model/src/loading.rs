// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Blueprint file loader.
//!
//! This module turns line-oriented text streams into validated `Blueprint`s,
//! one blueprint per line. Blank lines and lines starting with `#` are
//! skipped, so fixture files can carry comments.
//!
//! The expected line shape is:
//!
//! ```raw
//! Blueprint <id>: Each <name> <unit> costs <n> <resource>[ and <n> <resource>]. ...
//! ```
//!
//! Resource names and their order are supplied by the caller; the last name
//! is the target resource. Each parsed line runs through the fail-fast
//! `BlueprintBuilder` validation, so a loader success guarantees every
//! returned blueprint is well-formed.
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string slice,
//! making it convenient to integrate with benchmarks, tests, and tooling.
//! Errors carry the 1-based line number that produced them.

use crate::{
    blueprint::{Blueprint, BlueprintBuilder, BlueprintError},
    index::ResourceIndex,
};
use num_traits::{PrimInt, Unsigned};
use quarry_core::num::{
    constants::{PlusOne, Zero},
    ops::{
        checked_arithmetic::CheckedSubVal,
        saturating_arithmetic::SaturatingAddVal,
    },
};
use std::{
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the blueprint loading process.
#[derive(Debug)]
pub enum BlueprintLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// A line did not match the expected blueprint shape.
    MalformedLine {
        /// The 1-based line number of the offending line.
        line: usize,
    },
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// A cost sentence referenced a resource name the loader does not know.
    UnknownResource(UnknownResourceError),
    /// The parsed cost matrix failed blueprint validation.
    Validation(BlueprintError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "u32").
    pub type_name: &'static str,
    /// The 1-based line number the token came from.
    pub line: usize,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {} on line {}",
            self.token, self.type_name, self.line
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// Details about a reference to an unknown resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResourceError {
    /// The unrecognized resource name.
    pub name: String,
    /// The 1-based line number the name came from.
    pub line: usize,
}

impl std::fmt::Display for UnknownResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown resource name '{}' on line {}",
            self.name, self.line
        )
    }
}

impl std::error::Error for UnknownResourceError {}

impl Display for BlueprintLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedLine { line } => {
                write!(f, "Malformed blueprint on line {line}")
            }
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::UnknownResource(e) => write!(f, "Unknown resource: {}", e),
            Self::Validation(e) => write!(f, "Invalid blueprint: {}", e),
        }
    }
}

impl std::error::Error for BlueprintLoaderError {}

impl From<std::io::Error> for BlueprintLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for BlueprintLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<UnknownResourceError> for BlueprintLoaderError {
    fn from(e: UnknownResourceError) -> Self {
        Self::UnknownResource(e)
    }
}

impl From<BlueprintError> for BlueprintLoaderError {
    fn from(e: BlueprintError) -> Self {
        Self::Validation(e)
    }
}

/// A loader for blueprint files.
///
/// The loader is configured with the `R` resource names in index order; the
/// last name is the target resource. Cost sentences may name resources in
/// any order, but every name must be one of the configured ones.
///
/// # Examples
///
/// ```rust
/// # use quarry_model::loading::BlueprintLoader;
/// let loader = BlueprintLoader::<u32, 4>::new(["ore", "clay", "obsidian", "geode"]);
/// let blueprints = loader
///     .from_str("Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.")
///     .unwrap();
/// assert_eq!(blueprints.len(), 1);
/// assert_eq!(blueprints[0].id(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueprintLoader<T, const R: usize> {
    resource_names: [&'static str; R],
    _marker: std::marker::PhantomData<T>,
}

impl<T, const R: usize> BlueprintLoader<T, R>
where
    T: PrimInt
        + Unsigned
        + Zero
        + PlusOne
        + SaturatingAddVal
        + CheckedSubVal
        + FromStr
        + Display
        + Debug,
{
    /// Creates a new `BlueprintLoader` with the given resource names in
    /// index order.
    #[inline]
    pub fn new(resource_names: [&'static str; R]) -> Self {
        Self {
            resource_names,
            _marker: std::marker::PhantomData,
        }
    }

    /// Loads blueprints from a type implementing `BufRead`.
    pub fn from_bufread<Rd: BufRead>(
        &self,
        rdr: Rd,
    ) -> Result<Vec<Blueprint<T, R>>, BlueprintLoaderError> {
        let mut blueprints = Vec::new();

        for (index, line) in rdr.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            blueprints.push(self.parse_line(trimmed, index + 1)?);
        }

        Ok(blueprints)
    }

    /// Loads blueprints from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<Blueprint<T, R>>, BlueprintLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads blueprints from a generic reader.
    #[inline]
    pub fn from_reader<Rd: Read>(
        &self,
        r: Rd,
    ) -> Result<Vec<Blueprint<T, R>>, BlueprintLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads blueprints from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Vec<Blueprint<T, R>>, BlueprintLoaderError> {
        self.from_reader(s.as_bytes())
    }

    /// Parses one non-empty line into a validated blueprint.
    fn parse_line(
        &self,
        line: &str,
        line_number: usize,
    ) -> Result<Blueprint<T, R>, BlueprintLoaderError> {
        let (head, body) = line
            .split_once(':')
            .ok_or(BlueprintLoaderError::MalformedLine { line: line_number })?;

        let mut head_tokens = head.split_whitespace();
        let id_token = match (head_tokens.next(), head_tokens.next(), head_tokens.next()) {
            (Some("Blueprint"), Some(id_token), None) => id_token,
            _ => return Err(BlueprintLoaderError::MalformedLine { line: line_number }),
        };

        let id: usize = id_token.parse().map_err(|_| ParseTokenError {
            token: id_token.to_string(),
            type_name: "usize",
            line: line_number,
        })?;

        let mut builder: BlueprintBuilder<T, R> = Blueprint::builder(id);

        for sentence in body.split('.') {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            builder = self.parse_sentence(builder, sentence, line_number)?;
        }

        Ok(builder.build()?)
    }

    /// Parses one `Each <name> <unit> costs ...` sentence.
    fn parse_sentence(
        &self,
        mut builder: BlueprintBuilder<T, R>,
        sentence: &str,
        line_number: usize,
    ) -> Result<BlueprintBuilder<T, R>, BlueprintLoaderError> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();

        // "Each <name> <unit> costs" followed by at least one "<n> <resource>" pair.
        if tokens.len() < 6 || tokens[0] != "Each" || tokens[3] != "costs" {
            return Err(BlueprintLoaderError::MalformedLine { line: line_number });
        }

        let producer = self.resource_index(tokens[1], line_number)?;
        let mut rest = &tokens[4..];

        loop {
            if rest.len() < 2 {
                return Err(BlueprintLoaderError::MalformedLine { line: line_number });
            }

            let amount: T = rest[0].parse().map_err(|_| ParseTokenError {
                token: rest[0].to_string(),
                type_name: std::any::type_name::<T>(),
                line: line_number,
            })?;
            let resource = self.resource_index(rest[1], line_number)?;
            builder = builder.cost(producer, resource, amount);

            if rest.len() == 2 {
                break;
            }
            if rest[2] != "and" {
                return Err(BlueprintLoaderError::MalformedLine { line: line_number });
            }
            rest = &rest[3..];
        }

        Ok(builder)
    }

    /// Resolves a resource name to its index.
    fn resource_index(
        &self,
        name: &str,
        line_number: usize,
    ) -> Result<ResourceIndex, UnknownResourceError> {
        self.resource_names
            .iter()
            .position(|&candidate| candidate == name)
            .map(ResourceIndex::new)
            .ok_or_else(|| UnknownResourceError {
                name: name.to_string(),
                line: line_number,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINERAL_NAMES: [&str; 4] = ["ore", "clay", "obsidian", "geode"];

    const REFERENCE_LINES: &str = "\
Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.
Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.";

    fn loader() -> BlueprintLoader<u32, 4> {
        BlueprintLoader::new(MINERAL_NAMES)
    }

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    #[test]
    fn test_load_reference_lines() {
        let blueprints = loader().from_str(REFERENCE_LINES).unwrap();
        assert_eq!(blueprints.len(), 2);

        assert_eq!(blueprints[0].id(), 1);
        assert_eq!(*blueprints[0].cost(r(0)).as_array(), [4, 0, 0, 0]);
        assert_eq!(*blueprints[0].cost(r(2)).as_array(), [3, 14, 0, 0]);
        assert_eq!(*blueprints[0].cost(r(3)).as_array(), [2, 0, 7, 0]);

        assert_eq!(blueprints[1].id(), 2);
        assert_eq!(*blueprints[1].cost(r(3)).as_array(), [3, 0, 12, 0]);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let input = format!("# fixture header\n\n{}\n", REFERENCE_LINES);
        let blueprints = loader().from_str(&input).unwrap();
        assert_eq!(blueprints.len(), 2);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let result = loader().from_str("not a blueprint at all");
        assert!(matches!(
            result,
            Err(BlueprintLoaderError::MalformedLine { line: 1 })
        ));
    }

    #[test]
    fn test_unknown_resource_name() {
        let result = loader().from_str("Blueprint 1: Each ore robot costs 4 lava.");
        match result {
            Err(BlueprintLoaderError::UnknownResource(e)) => {
                assert_eq!(e.name, "lava");
                assert_eq!(e.line, 1);
            }
            other => panic!("expected UnknownResource, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unparsable_amount() {
        let result = loader().from_str("Blueprint 1: Each ore robot costs many ore.");
        assert!(matches!(result, Err(BlueprintLoaderError::Parse(_))));
    }

    #[test]
    fn test_target_cost_fails_validation() {
        let result = loader().from_str("Blueprint 1: Each ore robot costs 2 geode.");
        assert!(matches!(
            result,
            Err(BlueprintLoaderError::Validation(
                BlueprintError::TargetCostRequired { producer: 0 }
            ))
        ));
    }

    #[test]
    fn test_error_display() {
        let error = BlueprintLoaderError::MalformedLine { line: 7 };
        assert_eq!(format!("{}", error), "Malformed blueprint on line 7");
    }
}
