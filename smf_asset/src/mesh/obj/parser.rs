use std::{fmt, num};

use log::{debug, warn};

use super::builder::{SourceMesh, SourceMeshBuilder, SourceVertexRef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Line {line}: {kind} (\"{content}\")")]
pub struct ParserError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line, trimmed.
    pub content: String,
    /// Position of the offending token within the line, the directive being token 0.
    pub token: Option<usize>,
    pub kind: ParseErrorKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Failed to parse float \"{token}\"")]
    ParseFloat {
        token: String,
        source: num::ParseFloatError,
    },
    #[error("Number \"{token}\" is not finite")]
    NonFinite { token: String },
    #[error("Failed to parse index \"{token}\"")]
    ParseInt {
        token: String,
        source: num::ParseIntError,
    },
    #[error("`{directive}` expects {expected} values, found {found}")]
    MissingArgument {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Face needs three corners, found {0}")]
    MissingCorner(usize),
    #[error("Faces with {0} corners are not supported, only triangles")]
    PolygonFace(usize),
    #[error("Face corner \"{corner}\" has layout {layout}, expected v/vt/vn")]
    IncompleteCorner { corner: String, layout: FaceLayout },
    #[error("Malformed face corner \"{0}\"")]
    MalformedCorner(String),
}

/// The record kind introduced by the first token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Position,
    TexCoord,
    Normal,
    Face,
    MaterialLib,
    UseMaterial,
    Group,
    SmoothingGroup,
    Unknown,
}

impl From<&str> for Directive {
    fn from(keyword: &str) -> Self {
        match keyword {
            "v" => Directive::Position,
            "vt" => Directive::TexCoord,
            "vn" => Directive::Normal,
            "f" => Directive::Face,
            "mtllib" => Directive::MaterialLib,
            "usemtl" => Directive::UseMaterial,
            "g" => Directive::Group,
            "s" => Directive::SmoothingGroup,
            _ => Directive::Unknown,
        }
    }
}

/// Which indices a face corner carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceLayout {
    Position,
    PositionTexture,
    PositionNormal,
    PositionTextureNormal,
}

impl FaceLayout {
    pub fn detect(corner: &str) -> Option<Self> {
        let parts: Vec<&str> = corner.split('/').collect();
        match parts.as_slice() {
            [_] => Some(FaceLayout::Position),
            [_, _] => Some(FaceLayout::PositionTexture),
            [_, t, _] if t.is_empty() => Some(FaceLayout::PositionNormal),
            [_, _, _] => Some(FaceLayout::PositionTextureNormal),
            _ => None,
        }
    }
}

impl fmt::Display for FaceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FaceLayout::Position => "v",
            FaceLayout::PositionTexture => "v/vt",
            FaceLayout::PositionNormal => "v//vn",
            FaceLayout::PositionTextureNormal => "v/vt/vn",
        })
    }
}

/// A single non-empty, non-comment line split into lowercase tokens.
struct Line<'a> {
    number: usize,
    content: &'a str,
    tokens: Vec<&'a str>,
}

impl Line<'_> {
    fn error(&self, token: Option<usize>, kind: ParseErrorKind) -> ParserError {
        ParserError {
            line: self.number,
            content: self.content.to_owned(),
            token,
            kind,
        }
    }

    fn args(&self) -> &[&str] {
        &self.tokens[1..]
    }

    fn floats<const N: usize>(&self, directive: &'static str) -> Result<[f64; N], ParserError> {
        let found = self.args().len();
        if found < N {
            return Err(self.error(
                None,
                ParseErrorKind::MissingArgument {
                    directive,
                    expected: N,
                    found,
                },
            ));
        }

        let mut values = [0.0; N];
        for (i, value) in values.iter_mut().enumerate() {
            let token = self.tokens[i + 1];
            let parsed: f64 = token.parse().map_err(|source| {
                self.error(
                    Some(i + 1),
                    ParseErrorKind::ParseFloat {
                        token: token.to_owned(),
                        source,
                    },
                )
            })?;
            // rejects `nan`, `inf` and literals overflowing f64
            if !parsed.is_finite() {
                return Err(self.error(
                    Some(i + 1),
                    ParseErrorKind::NonFinite {
                        token: token.to_owned(),
                    },
                ));
            }
            *value = parsed;
        }

        Ok(values)
    }

    fn face(&self) -> Result<[SourceVertexRef; 3], ParserError> {
        let corners = self.args();
        match corners.len() {
            3 => {}
            n if n < 3 => return Err(self.error(None, ParseErrorKind::MissingCorner(n))),
            n => return Err(self.error(Some(4), ParseErrorKind::PolygonFace(n))),
        }

        let mut refs = [SourceVertexRef::default(); 3];
        for (i, corner) in refs.iter_mut().enumerate() {
            *corner = self.corner(i + 1)?;
        }
        Ok(refs)
    }

    fn corner(&self, position: usize) -> Result<SourceVertexRef, ParserError> {
        let token = self.tokens[position];
        match FaceLayout::detect(token) {
            Some(FaceLayout::PositionTextureNormal) => {}
            Some(layout) => {
                return Err(self.error(
                    Some(position),
                    ParseErrorKind::IncompleteCorner {
                        corner: token.to_owned(),
                        layout,
                    },
                ))
            }
            None => {
                return Err(self.error(
                    Some(position),
                    ParseErrorKind::MalformedCorner(token.to_owned()),
                ))
            }
        }

        let mut indices = [0i32; 3];
        for (index, part) in indices.iter_mut().zip(token.split('/')) {
            *index = part.parse().map_err(|source| {
                self.error(
                    Some(position),
                    ParseErrorKind::ParseInt {
                        token: part.to_owned(),
                        source,
                    },
                )
            })?;
        }

        Ok(SourceVertexRef::new(indices[0], indices[1], indices[2]))
    }
}

/// Parses the text of a Wavefront `.obj` model (https://en.wikipedia.org/wiki/Wavefront_.obj_file).
pub fn parse(text: &str) -> Result<SourceMesh, ParserError> {
    parse_lines(text.lines())
}

pub fn parse_lines<I, S>(lines: I) -> Result<SourceMesh, ParserError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = SourceMeshBuilder::default();

    for (i, raw) in lines.into_iter().enumerate() {
        let content = raw.as_ref().trim();
        let lowered = content.to_lowercase();
        if lowered.is_empty() || lowered.starts_with('#') {
            continue;
        }

        debug!("Parsing: \"{}\"", lowered);

        let line = Line {
            number: i + 1,
            content,
            tokens: lowered
                .split(|c: char| c == ' ' || c == '\t')
                .filter(|token| !token.is_empty())
                .collect(),
        };
        parse_line(&line, &mut builder)?;
    }

    Ok(builder.build())
}

fn parse_line(line: &Line, builder: &mut SourceMeshBuilder) -> Result<(), ParserError> {
    match Directive::from(line.tokens[0]) {
        Directive::Position => builder.push_position(line.floats("v")?),
        Directive::TexCoord => builder.push_texcoord(line.floats("vt")?),
        Directive::Normal => builder.push_normal(line.floats("vn")?),
        Directive::Face => builder.push_face(line.face()?),
        Directive::MaterialLib => warn!(".mtl materials are not supported. Ignoring."),
        Directive::UseMaterial => warn!("Materials are not supported. Ignoring."),
        Directive::SmoothingGroup => warn!("Smoothing groups are not supported. Ignoring."),
        Directive::Group => debug!("Groups are merged into a single mesh. Ignoring."),
        Directive::Unknown => debug!("Ignoring unknown directive: \"{}\"", line.tokens[0]),
    }

    Ok(())
}
