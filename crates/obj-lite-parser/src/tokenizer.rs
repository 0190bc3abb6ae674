// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OBJ line classifier
//!
//! Splits a trimmed line into its keyword and arguments. Numeric
//! arguments are parsed with lexical-core, face corners with nom.

use nom::{
    character::complete::{char, i64 as signed},
    combinator::opt,
    sequence::preceded,
    IResult, Parser,
};
use smallvec::SmallVec;

/// A classified OBJ line borrowing from the input
#[derive(Clone, Debug, PartialEq)]
pub enum Line<'a> {
    /// Empty line or `#` comment
    Blank,
    /// `o name`
    Object(&'a str),
    /// `g name`
    Group(&'a str),
    /// `usemtl name`
    UseMaterial(&'a str),
    /// `mtllib paths...`
    MaterialLibrary(&'a str),
    /// `v x y z`
    Position([f64; 3]),
    /// `vn x y z`
    Normal([f64; 3]),
    /// `vt u v`
    TexCoord([f64; 2]),
    /// `f` followed by its corner list
    Face(&'a str),
    /// Anything else, including malformed vertex lines
    Unknown(&'a str),
}

/// One `p/t/n` corner of a face, with 1-based or negative indices as written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: i64,
    pub uv: Option<i64>,
    pub normal: Option<i64>,
}

/// Face corners are rarely more than a quad
pub type FaceCorners = SmallVec<[FaceCorner; 8]>;

/// Classify a single line. Leading and trailing whitespace is ignored.
pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Blank;
    }

    let (keyword, rest, separated) = match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(split) => (&line[..split], line[split..].trim_start(), true),
        None => (line, "", false),
    };

    if keyword.eq_ignore_ascii_case("v") {
        parse_floats(rest).map_or(Line::Unknown(line), Line::Position)
    } else if keyword.eq_ignore_ascii_case("vn") {
        parse_floats(rest).map_or(Line::Unknown(line), Line::Normal)
    } else if keyword.eq_ignore_ascii_case("vt") {
        parse_floats(rest).map_or(Line::Unknown(line), Line::TexCoord)
    } else if keyword.eq_ignore_ascii_case("f") && separated {
        Line::Face(rest)
    } else if keyword.eq_ignore_ascii_case("o") && separated {
        Line::Object(rest)
    } else if keyword.eq_ignore_ascii_case("g") && separated {
        Line::Group(rest)
    } else if keyword.eq_ignore_ascii_case("usemtl") {
        Line::UseMaterial(rest)
    } else if keyword.eq_ignore_ascii_case("mtllib") {
        Line::MaterialLibrary(rest)
    } else {
        Line::Unknown(line)
    }
}

/// Parse the first `N` whitespace-separated floats; extra fields are ignored
///
/// `nan`, `inf` and literals beyond the f64 range do not count as numbers.
fn parse_floats<const N: usize>(input: &str) -> Option<[f64; N]> {
    let mut values = [0.0; N];
    let mut fields = input.split_ascii_whitespace();
    for value in values.iter_mut() {
        *value = lexical_core::parse::<f64>(fields.next()?.as_bytes())
            .ok()
            .filter(|v| v.is_finite())?;
    }
    Some(values)
}

fn index(input: &str) -> IResult<&str, i64> {
    signed(input)
}

/// `/index`, `/` or nothing
fn slot(input: &str) -> IResult<&str, Option<i64>> {
    let (input, value) = opt(preceded(char('/'), opt(index))).parse(input)?;
    Ok((input, value.flatten()))
}

/// Parse a `p`, `p/t`, `p//n` or `p/t/n` corner
fn corner(input: &str) -> IResult<&str, FaceCorner> {
    let (input, position) = index(input)?;
    let (input, uv) = slot(input)?;
    let (input, normal) = slot(input)?;
    Ok((
        input,
        FaceCorner {
            position,
            uv,
            normal,
        },
    ))
}

/// Parse the corner list of an `f` line
///
/// Fields that do not start with an index are skipped.
pub fn parse_face_corners(input: &str) -> FaceCorners {
    input
        .split_ascii_whitespace()
        .filter_map(|field| corner(field).ok().map(|(_, c)| c))
        .collect()
}

/// Split `mtllib` arguments into library paths
///
/// Paths may contain spaces: a path ends at every field whose extension is
/// `mtl`. Surrounding double quotes are stripped first.
pub fn split_mtl_paths(input: &str) -> Vec<String> {
    let input = input.trim();
    let input = input
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .filter(|s| !s.is_empty())
        .unwrap_or(input);

    let fields: Vec<&str> = input.split(' ').collect();
    let mut paths = Vec::new();
    let mut start = 0;
    for (i, field) in fields.iter().enumerate() {
        if field.rsplit('.').next() != Some("mtl") {
            continue;
        }
        paths.push(fields[start..=i].join(" "));
        start = i + 1;
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify_line(""), Line::Blank);
        assert_eq!(classify_line("   \t"), Line::Blank);
        assert_eq!(classify_line("# v 1 2 3"), Line::Blank);
    }

    #[test]
    fn test_vertex_lines() {
        assert_eq!(classify_line("v 1 2.5 -3e2"), Line::Position([1.0, 2.5, -300.0]));
        assert_eq!(classify_line("  V  0 0 1 1.0"), Line::Position([0.0, 0.0, 1.0]));
        assert_eq!(classify_line("vn 0 1 0"), Line::Normal([0.0, 1.0, 0.0]));
        assert_eq!(classify_line("vt 0.25 0.75"), Line::TexCoord([0.25, 0.75]));
        assert_eq!(classify_line("VT 1 0 0"), Line::TexCoord([1.0, 0.0]));
    }

    #[test]
    fn test_malformed_vertex_is_unknown() {
        assert_eq!(classify_line("v 1 2"), Line::Unknown("v 1 2"));
        assert_eq!(classify_line("vn a b c"), Line::Unknown("vn a b c"));
        assert_eq!(classify_line("v nan 0 0"), Line::Unknown("v nan 0 0"));
        assert_eq!(classify_line("v 0 inf 0"), Line::Unknown("v 0 inf 0"));
        assert_eq!(classify_line("vn 0 0 -infinity"), Line::Unknown("vn 0 0 -infinity"));
        assert_eq!(classify_line("vt NaN 1"), Line::Unknown("vt NaN 1"));
        assert_eq!(classify_line("v 1e400 0 0"), Line::Unknown("v 1e400 0 0"));
    }

    #[test]
    fn test_keyword_lines() {
        assert_eq!(classify_line("o Cube"), Line::Object("Cube"));
        assert_eq!(classify_line("g  left wing "), Line::Group("left wing"));
        assert_eq!(classify_line("USEMTL Red"), Line::UseMaterial("Red"));
        assert_eq!(classify_line("mtllib a.mtl"), Line::MaterialLibrary("a.mtl"));
        assert_eq!(classify_line("f 1 2 3"), Line::Face("1 2 3"));
        assert_eq!(classify_line("o"), Line::Unknown("o"));
        assert_eq!(classify_line("s off"), Line::Unknown("s off"));
    }

    #[test]
    fn test_face_corner_forms() {
        let corners = parse_face_corners("1 2/3 4//5 6/7/8 -1/-2/-3");
        assert_eq!(corners.len(), 5);
        assert_eq!(
            corners[0],
            FaceCorner {
                position: 1,
                uv: None,
                normal: None
            }
        );
        assert_eq!(corners[1].uv, Some(3));
        assert_eq!(corners[1].normal, None);
        assert_eq!(corners[2].uv, None);
        assert_eq!(corners[2].normal, Some(5));
        assert_eq!(corners[3].uv, Some(7));
        assert_eq!(corners[3].normal, Some(8));
        assert_eq!(corners[4].position, -1);
        assert_eq!(corners[4].normal, Some(-3));
    }

    #[test]
    fn test_face_skips_garbage_fields() {
        let corners = parse_face_corners("1 x 2 /3 3");
        let positions: Vec<i64> = corners.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_mtl_paths() {
        assert_eq!(split_mtl_paths("a.mtl"), vec!["a.mtl"]);
        assert_eq!(split_mtl_paths("a.mtl b.mtl"), vec!["a.mtl", "b.mtl"]);
        assert_eq!(split_mtl_paths("my file.mtl"), vec!["my file.mtl"]);
        assert_eq!(split_mtl_paths("\"quoted name.mtl\""), vec!["quoted name.mtl"]);
        assert!(split_mtl_paths("readme.txt").is_empty());
    }
}
