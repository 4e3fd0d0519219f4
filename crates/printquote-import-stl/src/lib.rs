//! STL ingestion.
//!
//! Decodes binary and ASCII STL payloads held in memory into a [`Mesh`].
//! Nothing is written to disk and a failed parse returns no partial mesh.
//!
//! Binary layout: 80-byte header, `u32` facet count, then per facet a normal
//! (ignored), three `f32` vertices and a `u16` attribute (ignored), all
//! little-endian. ASCII layout: `solid`, repeated
//! `facet normal / outer loop / vertex x3 / endloop / endfacet`, `endsolid`.

use anyhow::{Context, Result};
use printquote_core::config::DEFAULT_MAX_UPLOAD_BYTES;
use printquote_core::geom::Vec3;
use printquote_core::model::{Mesh, Triangle};
use printquote_core::{quote_by_name, MeshParseError, QuoteError, QuoteResult};
use std::io::Read;
use std::path::Path;

const HEADER_LEN: usize = 80;
const PREAMBLE_LEN: usize = HEADER_LEN + 4;
const FACET_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    Binary,
    Ascii,
}

impl StlEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            StlEncoding::Binary => "stl-binary",
            StlEncoding::Ascii => "stl-ascii",
        }
    }
}

/// Parses with the default upload limit.
pub fn parse_mesh(bytes: &[u8]) -> Result<Mesh, MeshParseError> {
    parse_stl(bytes, DEFAULT_MAX_UPLOAD_BYTES).map(|(_, mesh)| mesh)
}

pub fn parse_stl(bytes: &[u8], max_upload_bytes: u64) -> Result<(StlEncoding, Mesh), MeshParseError> {
    if bytes.is_empty() {
        return Err(MeshParseError::Empty);
    }
    let size = bytes.len() as u64;
    if size > max_upload_bytes {
        return Err(MeshParseError::TooLarge {
            size,
            limit: max_upload_bytes,
        });
    }

    let (encoding, mesh) = match detect_encoding(bytes)? {
        StlEncoding::Binary => (StlEncoding::Binary, parse_binary(bytes)?),
        StlEncoding::Ascii => match parse_ascii(bytes) {
            Ok(mesh) => (StlEncoding::Ascii, mesh),
            // Binary exporters sometimes write "solid" into the header.
            Err(err) if binary_facets_fit(bytes) => {
                tracing::warn!(error = %err, "not ASCII STL, reading as binary");
                (StlEncoding::Binary, parse_binary(bytes)?)
            }
            Err(err) => return Err(err),
        },
    };
    tracing::debug!(
        encoding = encoding.as_str(),
        bytes = bytes.len(),
        triangles = mesh.len(),
        "parsed STL"
    );
    Ok((encoding, mesh))
}

/// Runs one upload through parsing, material validation and pricing.
pub fn quote_upload(
    bytes: &[u8],
    material: &str,
    code: &str,
    max_upload_bytes: u64,
) -> Result<QuoteResult, QuoteError> {
    let (_, mesh) = parse_stl(bytes, max_upload_bytes)?;
    Ok(quote_by_name(&mesh, material, code)?)
}

/// Reads at most `max_upload_bytes + 1` bytes from `path` and parses them.
pub fn import_stl(path: &Path, max_upload_bytes: u64) -> Result<(StlEncoding, Mesh)> {
    let file = std::fs::File::open(path).with_context(|| format!("open STL: {path:?}"))?;
    let size = file
        .metadata()
        .with_context(|| format!("stat STL: {path:?}"))?
        .len();
    if size > max_upload_bytes {
        return Err(MeshParseError::TooLarge {
            size,
            limit: max_upload_bytes,
        })
        .with_context(|| format!("reject STL: {path:?}"));
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.take(max_upload_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .with_context(|| format!("read STL: {path:?}"))?;

    parse_stl(&bytes, max_upload_bytes).with_context(|| format!("parse STL: {path:?}"))
}

fn detect_encoding(bytes: &[u8]) -> Result<StlEncoding, MeshParseError> {
    // An exact size match wins even when the header happens to start with "solid".
    if let Some(declared) = declared_facets(bytes) {
        let expected = PREAMBLE_LEN as u64 + FACET_LEN as u64 * u64::from(declared);
        if expected == bytes.len() as u64 {
            return Ok(StlEncoding::Binary);
        }
    }
    if starts_with_solid(bytes) {
        return Ok(StlEncoding::Ascii);
    }
    if bytes.len() >= PREAMBLE_LEN {
        return Ok(StlEncoding::Binary);
    }
    Err(MeshParseError::UnknownFormat(format!(
        "{} bytes, neither an ASCII solid nor a binary header",
        bytes.len()
    )))
}

fn declared_facets(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_LEN..PREAMBLE_LEN)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn binary_facets_fit(bytes: &[u8]) -> bool {
    declared_facets(bytes).is_some_and(|declared| {
        (bytes.len() - PREAMBLE_LEN) / FACET_LEN >= declared as usize
    })
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes
        .get(start..start + 5)
        .is_some_and(|kw| kw.eq_ignore_ascii_case(b"solid"))
}

fn parse_binary(bytes: &[u8]) -> Result<Mesh, MeshParseError> {
    let declared = declared_facets(bytes).ok_or(MeshParseError::Truncated {
        declared: 0,
        available: 0,
    })?;
    let body = &bytes[PREAMBLE_LEN..];
    let available = body.len() / FACET_LEN;
    if (available as u64) < u64::from(declared) {
        return Err(MeshParseError::Truncated {
            declared,
            available,
        });
    }
    let used = declared as usize * FACET_LEN;
    if body.len() > used {
        tracing::warn!(
            trailing = body.len() - used,
            "ignoring bytes after the last declared STL facet"
        );
    }

    let mut triangles = Vec::with_capacity(declared as usize);
    for (index, facet) in body[..used].chunks_exact(FACET_LEN).enumerate() {
        let tri = Triangle::new(
            read_vertex(&facet[12..24]),
            read_vertex(&facet[24..36]),
            read_vertex(&facet[36..48]),
        );
        check_finite(&tri, index)?;
        triangles.push(tri);
    }
    Ok(Mesh::new(triangles))
}

fn read_vertex(buf: &[u8]) -> Vec3 {
    let f = |i: usize| f64::from(f32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]));
    Vec3::new(f(0), f(4), f(8))
}

fn check_finite(tri: &Triangle, index: usize) -> Result<(), MeshParseError> {
    if tri.vertices().iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MeshParseError::NonFinite { index })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AsciiState {
    Header,
    Solid,
    Facet,
    Loop,
    LoopClosed,
}

fn parse_ascii(bytes: &[u8]) -> Result<Mesh, MeshParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let line = bytes[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        MeshParseError::syntax(line, "invalid UTF-8")
    })?;

    let mut state = AsciiState::Header;
    let mut triangles = Vec::new();
    let mut corners: Vec<Vec3> = Vec::with_capacity(3);
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        last_line = line;
        let mut tokens = raw.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let keyword = keyword.to_ascii_lowercase();

        state = match (state, keyword.as_str()) {
            (AsciiState::Header, "solid") => AsciiState::Solid,
            (AsciiState::Solid, "facet") => AsciiState::Facet,
            (AsciiState::Solid, "endsolid") => return Ok(Mesh::new(triangles)),
            (AsciiState::Facet, "outer") => {
                if !tokens.next().is_some_and(|t| t.eq_ignore_ascii_case("loop")) {
                    return Err(MeshParseError::syntax(line, "expected 'outer loop'"));
                }
                corners.clear();
                AsciiState::Loop
            }
            (AsciiState::Loop, "vertex") => {
                if corners.len() == 3 {
                    return Err(MeshParseError::syntax(line, "facet has more than 3 vertices"));
                }
                corners.push(parse_vertex(tokens, line)?);
                AsciiState::Loop
            }
            (AsciiState::Loop, "endloop") => {
                if corners.len() != 3 {
                    return Err(MeshParseError::syntax(
                        line,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                }
                AsciiState::LoopClosed
            }
            (AsciiState::LoopClosed, "endfacet") => {
                let tri = Triangle::new(corners[0], corners[1], corners[2]);
                check_finite(&tri, triangles.len())?;
                triangles.push(tri);
                AsciiState::Solid
            }
            (state, other) => {
                return Err(MeshParseError::syntax(
                    line,
                    format!("unexpected '{other}' {}", expectation(state)),
                ));
            }
        };
    }

    Err(MeshParseError::syntax(
        last_line,
        format!("input ended {}", expectation(state)),
    ))
}

fn expectation(state: AsciiState) -> &'static str {
    match state {
        AsciiState::Header => "before 'solid'",
        AsciiState::Solid => "where 'facet' or 'endsolid' was expected",
        AsciiState::Facet => "where 'outer loop' was expected",
        AsciiState::Loop => "where 'vertex' or 'endloop' was expected",
        AsciiState::LoopClosed => "where 'endfacet' was expected",
    }
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec3, MeshParseError> {
    let mut coord = || -> Result<f64, MeshParseError> {
        let token = tokens
            .next()
            .ok_or_else(|| MeshParseError::syntax(line, "vertex needs 3 coordinates"))?;
        token
            .parse::<f64>()
            .map_err(|e| MeshParseError::syntax(line, format!("bad coordinate {token:?}: {e}")))
    };
    let x = coord()?;
    let y = coord()?;
    let z = coord()?;
    Ok(Vec3::new(x, y, z))
}
